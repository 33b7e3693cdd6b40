//! High-level entry point combining ZWNJ correction and transliteration
//!
//! The two steps are independent; [`Lutfiy::process`] runs ZWNJ correction
//! first and transliteration second.

use std::path::Path;

use crate::config::LutfiyConfig;
use crate::ngram::{AnalysisRecord, NgramError, NgramModel, TextProcessor};
use crate::translit;

/// Southern Uzbek text processor
///
/// Without a model only transliteration is available.
#[derive(Debug, Clone, Default)]
pub struct Lutfiy {
    /// N-gram model (None disables ZWNJ correction)
    model: Option<NgramModel>,
    /// Window used when a call does not pass one
    window_size: Option<usize>,
}

impl Lutfiy {
    /// Transliteration only
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: NgramModel) -> Self {
        Self {
            model: Some(model),
            window_size: None,
        }
    }

    /// Load a model file, or fall back to transliteration only if it cannot
    /// be loaded
    pub fn from_model_path(path: impl AsRef<Path>) -> Self {
        match NgramModel::load(path) {
            Ok(model) => Self::with_model(model),
            Err(e) => {
                log::warn!("{}; ZWNJ correction will not be available", e);
                Self::new()
            }
        }
    }

    /// Load a model file, failing if it cannot be loaded
    pub fn try_from_model_path(path: impl AsRef<Path>) -> Result<Self, NgramError> {
        Ok(Self::with_model(NgramModel::load(path)?))
    }

    /// Model and window from a config; no model path means no ZWNJ correction
    pub fn from_config(config: &LutfiyConfig) -> Self {
        let lutfiy = match &config.model_path {
            Some(path) => Self::from_model_path(path),
            None => Self::new(),
        };
        Self {
            window_size: config.window_size,
            ..lutfiy
        }
    }

    /// Set the default scoring window
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = Some(window_size);
        self
    }

    /// Whether ZWNJ correction is available
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&NgramModel> {
        self.model.as_ref()
    }

    /// Correct ZWNJ placement after every HEH
    pub fn fix_zwnj(&self, text: &str, window_size: Option<usize>) -> Result<String, NgramError> {
        self.processor()?.process(text, window_size.or(self.window_size))
    }

    /// Decision details for every HEH
    pub fn analyze_zwnj(
        &self,
        text: &str,
        window_size: Option<usize>,
    ) -> Result<Vec<AnalysisRecord>, NgramError> {
        self.processor()?.analyze(text, window_size.or(self.window_size))
    }

    /// Arabic script -> Latin
    pub fn transliterate(&self, text: &str) -> String {
        translit::transliterate(text)
    }

    /// Run the requested steps in order: ZWNJ correction, then
    /// transliteration
    ///
    /// ZWNJ correction is skipped when no model is loaded.
    pub fn process(
        &self,
        text: &str,
        fix_zwnj: bool,
        transliterate: bool,
    ) -> Result<String, NgramError> {
        let mut result = text.to_string();

        if fix_zwnj {
            if self.has_model() {
                result = self.fix_zwnj(&result, None)?;
            } else {
                log::debug!("no model loaded, skipping ZWNJ correction");
            }
        }

        if transliterate {
            result = self.transliterate(&result);
        }

        Ok(result)
    }

    fn processor(&self) -> Result<TextProcessor<'_>, NgramError> {
        self.model
            .as_ref()
            .map(TextProcessor::new)
            .ok_or(NgramError::NotTrained)
    }
}

/// Load `model_path` and correct ZWNJ placement in `text`
pub fn fix_zwnj(text: &str, model_path: impl AsRef<Path>) -> Result<String, NgramError> {
    Lutfiy::try_from_model_path(model_path)?.fix_zwnj(text, None)
}

/// Arabic script -> Latin with the built-in tables
pub fn transliterate(text: &str) -> String {
    translit::transliterate(text)
}

/// One-shot [`Lutfiy::process`]; ZWNJ correction needs `model_path`
pub fn process_text(
    text: &str,
    fix_zwnj: bool,
    transliterate: bool,
    model_path: Option<&Path>,
) -> Result<String, NgramError> {
    let lutfiy = match model_path {
        Some(path) => Lutfiy::from_model_path(path),
        None => Lutfiy::new(),
    };
    lutfiy.process(text, fix_zwnj, transliterate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngram::{NgramConfig, ZWNJ};

    fn model() -> NgramModel {
        let corpus = [
            "کېله\u{200C}جگی",
            "کېله\u{200C}جگی",
            "کېله\u{200C}جگی",
            "بیله\u{200C}ن",
        ];
        NgramModel::from_corpus(&NgramConfig::new().with_order(3), corpus).unwrap()
    }

    #[test]
    fn test_without_model() {
        let lutfiy = Lutfiy::new();
        assert!(!lutfiy.has_model());
        assert!(matches!(
            lutfiy.fix_zwnj("کېلهجگی", None),
            Err(NgramError::NotTrained)
        ));
        assert!(lutfiy.analyze_zwnj("کېلهجگی", None).is_err());

        // ZWNJ step is skipped, transliteration still runs
        assert_eq!(lutfiy.process("کتاب", true, true).unwrap(), "ktab");
        assert_eq!(lutfiy.process("کتاب", true, false).unwrap(), "کتاب");
    }

    #[test]
    fn test_missing_model_file_degrades() {
        let lutfiy = Lutfiy::from_model_path("/nonexistent/lutfiy/model.json");
        assert!(!lutfiy.has_model());
        assert_eq!(lutfiy.transliterate("ب"), "b");

        assert!(matches!(
            Lutfiy::try_from_model_path("/nonexistent/lutfiy/model.json"),
            Err(NgramError::Load { .. })
        ));
    }

    #[test]
    fn test_fix_zwnj_inserts_learned_zwnj() {
        let lutfiy = Lutfiy::with_model(model());
        let fixed = lutfiy.fix_zwnj("کېلهجگی", None).unwrap();
        assert_eq!(fixed, "کېله\u{200C}جگی");
    }

    #[test]
    fn test_process_order() {
        let lutfiy = Lutfiy::with_model(model());

        let fixed = lutfiy.process("کېلهجگی", true, false).unwrap();
        assert!(fixed.contains(ZWNJ));

        // ZWNJ survives transliteration as a pass-through character
        let both = lutfiy.process("کېلهجگی", true, true).unwrap();
        assert_eq!(both, lutfiy.transliterate(&fixed));

        let neither = lutfiy.process("کېلهجگی", false, false).unwrap();
        assert_eq!(neither, "کېلهجگی");
    }

    #[test]
    fn test_window_override() {
        let lutfiy = Lutfiy::with_model(model()).with_window_size(4);
        let records = lutfiy.analyze_zwnj("کېلهجگی", None).unwrap();
        let explicit = lutfiy.analyze_zwnj("کېلهجگی", Some(4)).unwrap();
        assert_eq!(records, explicit);
    }

    #[test]
    fn test_from_config() {
        let config = LutfiyConfig {
            model_path: None,
            window_size: Some(5),
            ..LutfiyConfig::default()
        };
        let lutfiy = Lutfiy::from_config(&config);
        assert!(!lutfiy.has_model());
        assert_eq!(lutfiy.window_size, Some(5));
    }

    #[test]
    fn test_free_functions() {
        assert_eq!(transliterate("نگ"), "ng");
        assert_eq!(process_text("کتاب", true, true, None).unwrap(), "ktab");
        assert!(fix_zwnj("کېلهجگی", "/nonexistent/model.json").is_err());
    }
}
