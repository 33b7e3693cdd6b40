//! Whole-text ZWNJ correction
//!
//! Applies [`ZwnjDecisionEngine`] to every marker of a text, left to right.
//! Each decision is final and earlier choices are never revisited.

use serde::Serialize;

use super::decision::{DecisionOptions, ZwnjAction, ZwnjDecisionEngine, MARKER, ZWNJ};
use super::model::{NgramError, NgramModel};

/// Characters shown on each side of a marker in [`AnalysisRecord::context`]
const CONTEXT_RADIUS: usize = 5;

/// Decision details for one marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRecord {
    /// Character offset of the marker in the input
    pub position: usize,
    /// Input around the marker, clipped to the text
    pub context: String,
    /// Score of every offered action
    pub options: DecisionOptions,
    /// Action with the highest score
    pub best_option: ZwnjAction,
    /// Best score over the sum of scores (0.0 ~ 1.0)
    pub confidence: f64,
}

/// Corrects ZWNJ placement across a whole text
#[derive(Debug, Clone, Copy)]
pub struct TextProcessor<'m> {
    engine: ZwnjDecisionEngine<'m>,
}

impl<'m> TextProcessor<'m> {
    pub fn new(model: &'m NgramModel) -> Self {
        Self {
            engine: ZwnjDecisionEngine::new(model),
        }
    }

    pub fn engine(&self) -> &ZwnjDecisionEngine<'m> {
        &self.engine
    }

    /// Apply the best action at every marker and return the corrected text
    ///
    /// Scoring reads only forward from a marker, and an edit never reaches
    /// past the character after its marker, so every decision is made on
    /// the input as given. The output is built in one append-only pass;
    /// `offset` counts inserted ZWNJs, so a marker at input offset `p` sits
    /// at `p + offset` in the output.
    pub fn process(&self, text: &str, window_size: Option<usize>) -> Result<String, NgramError> {
        let original: Vec<char> = text.chars().collect();
        let markers = marker_positions(&original);

        if !self.engine.model().is_trained() {
            return Err(NgramError::NotTrained);
        }
        if markers.is_empty() {
            return Ok(text.to_string());
        }

        let mut output = String::with_capacity(text.len() + markers.len() * ZWNJ.len_utf8());
        let mut copied = 0usize;
        let mut offset = 0usize;

        for &position in &markers {
            let options = self.engine.decide(&original, position, window_size)?;
            output.extend(&original[copied..=position]);
            copied = position + 1;

            match options.best().0 {
                ZwnjAction::NoChange => {}
                ZwnjAction::InsertZwnj => {
                    output.push(ZWNJ);
                    offset += 1;
                }
                ZwnjAction::ReplaceSpaceWithZwnj => {
                    if original.get(copied) == Some(&' ') {
                        output.push(ZWNJ);
                        copied += 1;
                    }
                }
            }
        }
        output.extend(&original[copied..]);

        log::debug!("processed {} markers, inserted {} ZWNJ", markers.len(), offset);
        Ok(output)
    }

    /// Per-marker decision details, without changing the text
    pub fn analyze(
        &self,
        text: &str,
        window_size: Option<usize>,
    ) -> Result<Vec<AnalysisRecord>, NgramError> {
        let chars: Vec<char> = text.chars().collect();
        let markers = marker_positions(&chars);

        if !self.engine.model().is_trained() {
            return Err(NgramError::NotTrained);
        }

        markers
            .into_iter()
            .map(|position| -> Result<AnalysisRecord, NgramError> {
                let options = self.engine.decide(&chars, position, window_size)?;
                let start = position.saturating_sub(CONTEXT_RADIUS);
                let end = (position + CONTEXT_RADIUS + 1).min(chars.len());

                Ok(AnalysisRecord {
                    position,
                    context: chars[start..end].iter().collect(),
                    options,
                    best_option: options.best().0,
                    confidence: options.confidence(),
                })
            })
            .collect()
    }
}

/// Character offsets of every marker
pub fn marker_positions(text: &[char]) -> Vec<usize> {
    text.iter()
        .enumerate()
        .filter(|&(_, &c)| c == MARKER)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngram::NgramConfig;

    fn model() -> NgramModel {
        NgramModel::from_corpus(
            &NgramConfig::new().with_order(3),
            ["کېلهجگی", "بیلهن کېلدی", "اوقه بېردی"],
        )
        .unwrap()
    }

    #[test]
    fn test_untrained_model() {
        let model = NgramModel::new();
        let processor = TextProcessor::new(&model);
        assert!(matches!(
            processor.process("اه", None),
            Err(NgramError::NotTrained)
        ));
        assert!(matches!(
            processor.analyze("اه", None),
            Err(NgramError::NotTrained)
        ));
    }

    #[test]
    fn test_untrained_model_without_markers() {
        let model = NgramModel::new();
        let processor = TextProcessor::new(&model);
        assert!(processor.process("salom", None).is_err());
    }

    #[test]
    fn test_no_markers() {
        let model = model();
        let processor = TextProcessor::new(&model);

        assert_eq!(processor.process("بویوک دولت", None).unwrap(), "بویوک دولت");
        assert!(processor.analyze("بویوک دولت", None).unwrap().is_empty());
        assert_eq!(processor.process("", None).unwrap(), "");
    }

    #[test]
    fn test_marker_positions() {
        let text: Vec<char> = "هاه ه".chars().collect();
        assert_eq!(marker_positions(&text), vec![0, 2, 4]);
    }

    #[test]
    fn test_analyze_records() {
        let model = model();
        let processor = TextProcessor::new(&model);
        let text = "بیلهن کېلدی اوقه";

        let records = processor.analyze(text, None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].position, 3);
        assert_eq!(records[1].position, 15);

        for record in &records {
            assert!((0.0..=1.0).contains(&record.confidence));
            let max = record
                .options
                .iter()
                .map(|(_, s)| s)
                .fold(f64::MIN, f64::max);
            assert_eq!(record.options.get(record.best_option), Some(max));
        }
    }

    #[test]
    fn test_analyze_context_is_clipped() {
        let model = model();
        let processor = TextProcessor::new(&model);

        let records = processor.analyze("اوقه", None).unwrap();
        assert_eq!(records[0].context, "اوقه");

        let records = processor.analyze("ابجدسصهکلمنوی", None).unwrap();
        // 5 before, marker, 5 after
        assert_eq!(records[0].context, "بجدسصهکلمنو");
    }

    #[test]
    fn test_analyze_does_not_change_decisions() {
        let model = model();
        let processor = TextProcessor::new(&model);
        let text = "کېلهجگی";

        let record = &processor.analyze(text, None).unwrap()[0];
        let chars: Vec<char> = text.chars().collect();
        let direct = processor.engine().decide(&chars, 3, None).unwrap();
        assert_eq!(record.options, direct);
    }

    #[test]
    fn test_process_keeps_length_or_grows_by_inserts() {
        let model = model();
        let processor = TextProcessor::new(&model);
        let text = "اوقه بېردی کېلهجگی";

        let result = processor.process(text, None).unwrap();
        let removed_spaces = text.matches(' ').count() - result.matches(' ').count();
        let zwnj = result.matches(ZWNJ).count();
        assert_eq!(
            result.chars().count(),
            text.chars().count() + (zwnj - removed_spaces)
        );
    }

    /// Live-buffer rendition of the same greedy pass
    fn process_in_place(processor: &TextProcessor<'_>, text: &str) -> String {
        let mut buffer: Vec<char> = text.chars().collect();
        let markers = marker_positions(&buffer);
        let mut offset = 0;
        for position in markers {
            let current = position + offset;
            let options = processor.engine().decide(&buffer, current, None).unwrap();
            match options.best().0 {
                ZwnjAction::NoChange => {}
                ZwnjAction::InsertZwnj => {
                    buffer.insert(current + 1, ZWNJ);
                    offset += 1;
                }
                ZwnjAction::ReplaceSpaceWithZwnj => buffer[current + 1] = ZWNJ,
            }
        }
        buffer.into_iter().collect()
    }

    #[test]
    fn test_matches_in_place_editing() {
        let model = NgramModel::from_corpus(
            &NgramConfig::new().with_order(3),
            ["کېله\u{200C}جگی", "کېله\u{200C}جگی", "اوقه بېردی", "بیله\u{200C}ن"],
        )
        .unwrap();
        let processor = TextProcessor::new(&model);

        for text in [
            "کېلهجگی",
            "کېله جگی اوقه بېردی",
            "هههه",
            "بیله ن کېلهجگی ه",
            "اوقه",
            "ه ه ه",
        ] {
            assert_eq!(
                processor.process(text, None).unwrap(),
                process_in_place(&processor, text),
                "{}",
                text
            );
        }
    }
}
