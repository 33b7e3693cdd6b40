//! Character n-gram model: training, smoothed probabilities, persistence
//!
//! Counts every `n`-character window of a corpus together with its leading
//! `n-1` character context, and answers Laplace-smoothed probability
//! queries. Models are stored as JSON documents.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

use super::config::NgramConfig;

/// Version written to and accepted from model files
pub const FORMAT_VERSION: u32 = 1;

/// Errors raised by model construction, queries and persistence
#[derive(Debug, Error)]
pub enum NgramError {
    /// Query on a model that was never trained or loaded
    #[error("model must be trained or loaded before use")]
    NotTrained,

    /// Missing, unreadable or malformed model file
    #[error("failed to load model from {path}: {reason}")]
    Load { path: String, reason: String },

    /// Write failure, or an attempt to save an untrained model
    #[error("failed to save model to {path}: {reason}")]
    Save { path: String, reason: String },

    /// Order or smoothing outside the allowed range
    #[error("invalid model configuration: {0}")]
    InvalidConfig(String),
}

impl NgramError {
    fn load(path: impl Display, reason: impl Display) -> Self {
        NgramError::Load {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    fn save(path: impl Display, reason: impl Display) -> Self {
        NgramError::Save {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Character n-gram model
///
/// Read-only once trained: every query takes `&self`, and only [`train`]
/// (which needs `&mut self`) replaces the counts.
///
/// [`train`]: NgramModel::train
#[derive(Debug, Clone)]
pub struct NgramModel {
    /// Characters per n-gram
    n: usize,
    /// n-gram -> occurrences
    ngram_counts: HashMap<String, u64>,
    /// leading n-1 characters -> occurrences (empty when n == 1)
    context_counts: HashMap<String, u64>,
    /// Distinct characters seen in any n-gram
    vocab: BTreeSet<char>,
    /// Number of n-gram windows counted
    total_ngrams: u64,
    /// Add-k constant
    smoothing: f64,
    trained: bool,
}

/// On-disk layout, owned side
#[derive(Deserialize)]
struct ModelFile {
    format_version: u32,
    n: usize,
    smoothing: f64,
    total_ngrams: u64,
    vocab: BTreeSet<char>,
    ngram_counts: HashMap<String, u64>,
    #[serde(default)]
    context_counts: HashMap<String, u64>,
}

/// On-disk layout, borrowed side
#[derive(Serialize)]
struct ModelFileRef<'a> {
    format_version: u32,
    n: usize,
    smoothing: f64,
    total_ngrams: u64,
    vocab: &'a BTreeSet<char>,
    ngram_counts: &'a HashMap<String, u64>,
    context_counts: &'a HashMap<String, u64>,
}

impl Default for NgramModel {
    fn default() -> Self {
        Self::new()
    }
}

impl NgramModel {
    /// Untrained order-4 model with default smoothing
    pub fn new() -> Self {
        let config = NgramConfig::default();
        Self::blank(config.order, config.smoothing)
    }

    /// Untrained model with the given order and smoothing
    pub fn with_config(config: &NgramConfig) -> Result<Self, NgramError> {
        config.validate().map_err(NgramError::InvalidConfig)?;
        Ok(Self::blank(config.order, config.smoothing))
    }

    /// Build and train a model in one step
    pub fn from_corpus<I, S>(config: &NgramConfig, corpus: I) -> Result<Self, NgramError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut model = Self::with_config(config)?;
        model.train(corpus);
        Ok(model)
    }

    fn blank(n: usize, smoothing: f64) -> Self {
        Self {
            n,
            ngram_counts: HashMap::new(),
            context_counts: HashMap::new(),
            vocab: BTreeSet::new(),
            total_ngrams: 0,
            smoothing,
            trained: false,
        }
    }

    /// Count all n-grams of `corpus`, discarding any previous training
    ///
    /// Each text has its whitespace runs collapsed to one space and its ends
    /// trimmed before counting. Texts shorter than `n` characters add nothing.
    pub fn train<I, S>(&mut self, corpus: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ngram_counts.clear();
        self.context_counts.clear();
        self.vocab.clear();
        self.total_ngrams = 0;

        let n = self.n;
        let mut texts = 0usize;

        for text in corpus {
            texts += 1;
            let chars: Vec<char> = normalize_whitespace(text.as_ref()).chars().collect();

            for window in chars.windows(n) {
                *self
                    .ngram_counts
                    .entry(window.iter().collect())
                    .or_insert(0) += 1;
                self.total_ngrams += 1;
                self.vocab.extend(window.iter().copied());

                if n > 1 {
                    *self
                        .context_counts
                        .entry(window[..n - 1].iter().collect())
                        .or_insert(0) += 1;
                }
            }
        }

        self.trained = true;
        log::info!(
            "trained order-{} model on {} texts: vocab {}, total n-grams {}, unique n-grams {}",
            n,
            texts,
            self.vocab.len(),
            self.total_ngrams,
            self.ngram_counts.len()
        );
    }

    /// Laplace-smoothed probability of `ngram`
    ///
    /// With a context: P(last char | context)
    /// = (C(ngram) + s) / (C(context) + s*V), falling back to
    /// (C(ngram) + s) / (total + s*V) when the context was never seen.
    ///
    /// Without a context: joint P(ngram) = (C(ngram) + s) / (total + s*V^n).
    pub fn probability(&self, ngram: &str, context: Option<&str>) -> Result<f64, NgramError> {
        if !self.trained {
            return Err(NgramError::NotTrained);
        }

        let s = self.smoothing;
        // empty vocabulary counts as 1 so the denominator stays positive
        let v = self.vocab.len().max(1) as f64;
        let ngram_count = self.ngram_count(ngram) as f64;
        let total = self.total_ngrams as f64;

        let prob = match context {
            Some(context) => {
                let context_count = self.context_count(context);
                if context_count == 0 {
                    (ngram_count + s) / (total + s * v)
                } else {
                    (ngram_count + s) / (context_count as f64 + s * v)
                }
            }
            None => {
                // order fits in i32, checked by NgramConfig::validate
                let exponent = i32::try_from(self.n).unwrap_or(i32::MAX);
                (ngram_count + s) / (total + s * v.powi(exponent))
            }
        };

        // V^n can overflow to infinity for long orders
        Ok(prob.max(f64::MIN_POSITIVE))
    }

    /// Occurrences of an n-gram
    pub fn ngram_count(&self, ngram: &str) -> u64 {
        self.ngram_counts.get(ngram).copied().unwrap_or(0)
    }

    /// Occurrences of a context
    pub fn context_count(&self, context: &str) -> u64 {
        self.context_counts.get(context).copied().unwrap_or(0)
    }

    /// Model order
    pub fn order(&self) -> usize {
        self.n
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    pub fn vocab(&self) -> &BTreeSet<char> {
        &self.vocab
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Total n-gram windows counted
    pub fn total_ngrams(&self) -> u64 {
        self.total_ngrams
    }

    /// Distinct n-grams
    pub fn unique_ngrams(&self) -> usize {
        self.ngram_counts.len()
    }

    /// Trained or loaded
    pub fn is_trained(&self) -> bool {
        self.trained
    }

    /// Load a model file
    ///
    /// # File format
    /// ```json
    /// {
    ///   "format_version": 1,
    ///   "n": 4,
    ///   "smoothing": 1e-6,
    ///   "total_ngrams": 2,
    ///   "vocab": ["a", "b", "c", "d", "e"],
    ///   "ngram_counts": { "abcd": 1, "bcde": 1 },
    ///   "context_counts": { "abc": 1, "bcd": 1 }
    /// }
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NgramError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| NgramError::load(path.display(), e))?;
        let parsed: ModelFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| NgramError::load(path.display(), e))?;
        let model =
            Self::from_model_file(parsed).map_err(|e| NgramError::load(path.display(), e))?;

        log::info!(
            "loaded order-{} model from {}: vocab {}, total n-grams {}",
            model.n,
            path.display(),
            model.vocab.len(),
            model.total_ngrams
        );
        Ok(model)
    }

    /// Parse a model from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, NgramError> {
        let parsed: ModelFile =
            serde_json::from_str(json_str).map_err(|e| NgramError::load("<json>", e))?;
        Self::from_model_file(parsed).map_err(|e| NgramError::load("<json>", e))
    }

    /// Serialize a trained model to a JSON string
    pub fn to_json(&self) -> Result<String, NgramError> {
        if !self.trained {
            return Err(NgramError::save("<json>", "model must be trained before saving"));
        }
        serde_json::to_string(&self.as_model_file()).map_err(|e| NgramError::save("<json>", e))
    }

    /// Write a trained model to `path`
    ///
    /// Parent directories are created. The file is written to a temporary
    /// file next to `path` and then renamed over it.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), NgramError> {
        let path = path.as_ref();
        if !self.trained {
            return Err(NgramError::save(path.display(), "model must be trained before saving"));
        }

        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| NgramError::save(path.display(), e))?;

        let mut temp =
            NamedTempFile::new_in(parent).map_err(|e| NgramError::save(path.display(), e))?;
        {
            let mut writer = BufWriter::new(&mut temp);
            serde_json::to_writer(&mut writer, &self.as_model_file())
                .map_err(|e| NgramError::save(path.display(), e))?;
            writer.flush().map_err(|e| NgramError::save(path.display(), e))?;
        }
        temp.persist(path).map_err(|e| NgramError::save(path.display(), e))?;

        log::info!("saved order-{} model to {}", self.n, path.display());
        Ok(())
    }

    fn as_model_file(&self) -> ModelFileRef<'_> {
        ModelFileRef {
            format_version: FORMAT_VERSION,
            n: self.n,
            smoothing: self.smoothing,
            total_ngrams: self.total_ngrams,
            vocab: &self.vocab,
            ngram_counts: &self.ngram_counts,
            context_counts: &self.context_counts,
        }
    }

    fn from_model_file(file: ModelFile) -> Result<Self, String> {
        if file.format_version != FORMAT_VERSION {
            return Err(format!(
                "unsupported format_version {} (expected {})",
                file.format_version, FORMAT_VERSION
            ));
        }
        NgramConfig::new()
            .with_order(file.n)
            .with_smoothing(file.smoothing)
            .validate()?;

        if let Some(key) = file.ngram_counts.keys().find(|k| k.chars().count() != file.n) {
            return Err(format!("n-gram '{}' is not {} characters long", key, file.n));
        }
        if let Some(key) = file
            .context_counts
            .keys()
            .find(|k| k.chars().count() != file.n - 1)
        {
            return Err(format!(
                "context '{}' is not {} characters long",
                key,
                file.n - 1
            ));
        }

        Ok(Self {
            n: file.n,
            ngram_counts: file.ngram_counts,
            context_counts: file.context_counts,
            vocab: file.vocab,
            total_ngrams: file.total_ngrams,
            smoothing: file.smoothing,
            trained: true,
        })
    }
}

/// Collapse whitespace runs to a single space and trim both ends
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
