pub mod api;
pub mod config;
pub mod ngram;
pub mod translit;

pub use api::{fix_zwnj, process_text, transliterate, Lutfiy};
pub use ngram::{AnalysisRecord, NgramError, NgramModel, ZwnjAction};
