//! N-gram based ZWNJ correction
//!
//! Decides, for every HEH (`ه`) in Arabic-script Southern Uzbek text,
//! whether a ZWNJ belongs after it.
//!
//! # Overview
//!
//! The pipeline has four layers:
//!
//! 1. **Model**: character n-gram counts with Laplace smoothing
//! 2. **Scorer**: geometric mean of conditional probabilities in a window
//! 3. **Decision**: scores "no change", "insert ZWNJ" and "space to ZWNJ"
//! 4. **Processor**: applies the best decision to each marker, left to right
//!
//! # Example
//!
//! ```
//! use lutfiy::ngram::{NgramConfig, NgramModel, TextProcessor, ZwnjAction};
//!
//! let corpus = ["کېله\u{200C}جگی بویوک", "بیله\u{200C}ن کېلدی"];
//! let model = NgramModel::from_corpus(&NgramConfig::new().with_order(3), corpus).unwrap();
//!
//! let processor = TextProcessor::new(&model);
//! let records = processor.analyze("کېلهجگی", None).unwrap();
//! assert_eq!(records.len(), 1);
//! assert!(records[0].options.contains(ZwnjAction::InsertZwnj));
//!
//! let fixed = processor.process("کېلهجگی", None).unwrap();
//! assert!(fixed.chars().count() >= "کېلهجگی".chars().count());
//! ```
//!
//! Models are saved and loaded as JSON:
//!
//! ```no_run
//! use lutfiy::ngram::NgramModel;
//!
//! let model = NgramModel::load("data/ngram_model.json").unwrap();
//! model.save("backup/ngram_model.json").unwrap();
//! ```

mod config;
mod decision;
mod model;
mod processor;
mod scorer;

// Public interface
pub use config::{NgramConfig, DEFAULT_ORDER, DEFAULT_SMOOTHING};
pub use decision::{DecisionOptions, ZwnjAction, ZwnjDecisionEngine, MARKER, ZWNJ};
pub use model::{NgramError, NgramModel, FORMAT_VERSION};
pub use processor::{marker_positions, AnalysisRecord, TextProcessor};
pub use scorer::SequenceScorer;
