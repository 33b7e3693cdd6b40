//! ZWNJ decision after the marker letter
//!
//! For one marker occurrence, scores the text as it is, with a ZWNJ inserted
//! after the marker, and with the following space turned into a ZWNJ, and
//! reports the score of every variant that applies.

use std::fmt;

use serde::Serialize;

use super::model::{NgramError, NgramModel};
use super::scorer::SequenceScorer;

/// Letter whose trailing boundary is decided on (ARABIC LETTER HEH)
pub const MARKER: char = '\u{0647}';

/// ZERO WIDTH NON-JOINER
pub const ZWNJ: char = '\u{200C}';

/// What to do after a marker
///
/// Declaration order is the tie-break order: when two actions score the
/// same, the earlier one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZwnjAction {
    /// Leave the text alone
    NoChange,
    /// Insert a ZWNJ right after the marker
    InsertZwnj,
    /// Turn the space right after the marker into a ZWNJ
    ReplaceSpaceWithZwnj,
}

impl ZwnjAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZwnjAction::NoChange => "no_change",
            ZwnjAction::InsertZwnj => "insert_zwnj",
            ZwnjAction::ReplaceSpaceWithZwnj => "replace_space_with_zwnj",
        }
    }
}

impl fmt::Display for ZwnjAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scores of the applicable actions at one marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecisionOptions {
    pub no_change: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_zwnj: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_space_with_zwnj: Option<f64>,
}

impl DecisionOptions {
    /// Score of `action`, if it was offered
    pub fn get(&self, action: ZwnjAction) -> Option<f64> {
        match action {
            ZwnjAction::NoChange => Some(self.no_change),
            ZwnjAction::InsertZwnj => self.insert_zwnj,
            ZwnjAction::ReplaceSpaceWithZwnj => self.replace_space_with_zwnj,
        }
    }

    /// Offered actions in tie-break order
    pub fn iter(&self) -> impl Iterator<Item = (ZwnjAction, f64)> + '_ {
        [
            ZwnjAction::NoChange,
            ZwnjAction::InsertZwnj,
            ZwnjAction::ReplaceSpaceWithZwnj,
        ]
        .into_iter()
        .filter_map(move |action| self.get(action).map(|score| (action, score)))
    }

    pub fn contains(&self, action: ZwnjAction) -> bool {
        self.get(action).is_some()
    }

    /// Highest-scoring action; ties go to the earliest in tie-break order
    pub fn best(&self) -> (ZwnjAction, f64) {
        self.iter()
            .fold((ZwnjAction::NoChange, self.no_change), |best, candidate| {
                if candidate.1 > best.1 {
                    candidate
                } else {
                    best
                }
            })
    }

    /// Sum of all offered scores
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, score)| score).sum()
    }

    /// Best score over the sum of scores, 0 when the sum is 0
    pub fn confidence(&self) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.best().1 / total
        } else {
            0.0
        }
    }
}

/// Chooses among ZWNJ actions by comparing windowed scores
#[derive(Debug, Clone, Copy)]
pub struct ZwnjDecisionEngine<'m> {
    scorer: SequenceScorer<'m>,
}

impl<'m> ZwnjDecisionEngine<'m> {
    pub fn new(model: &'m NgramModel) -> Self {
        Self {
            scorer: SequenceScorer::new(model),
        }
    }

    pub fn model(&self) -> &'m NgramModel {
        self.scorer.model()
    }

    /// Window used when none is given: twice the model order
    pub fn default_window(&self) -> usize {
        self.model().order() * 2
    }

    /// Score every applicable action for the marker at `position`
    ///
    /// - `no_change` is always scored, over `window_size` characters.
    /// - `insert_zwnj` is offered whenever `position + 1 <= text.len()`, and
    ///   is scored over `window_size + 1` characters so the same text after
    ///   the marker stays in view.
    /// - `replace_space_with_zwnj` is offered only when a space follows the
    ///   marker, scored over `window_size` characters.
    pub fn decide(
        &self,
        text: &[char],
        position: usize,
        window_size: Option<usize>,
    ) -> Result<DecisionOptions, NgramError> {
        if !self.model().is_trained() {
            return Err(NgramError::NotTrained);
        }

        let window = window_size.unwrap_or_else(|| self.default_window());

        let no_change = self.scorer.score(text, position, window)?;

        // Scoring reads only forward from `position`, so each variant is
        // built from the marker onwards and scored from its start.
        let insert_zwnj = if position < text.len() {
            let widened = window.saturating_add(1);
            let variant = zwnj_variant(text, position, 0, widened);
            Some(self.scorer.score(&variant, 0, widened)?)
        } else {
            None
        };

        let next = position.checked_add(1).and_then(|i| text.get(i));
        let replace_space_with_zwnj = if next == Some(&' ') {
            let variant = zwnj_variant(text, position, 1, window);
            Some(self.scorer.score(&variant, 0, window)?)
        } else {
            None
        };

        let options = DecisionOptions {
            no_change,
            insert_zwnj,
            replace_space_with_zwnj,
        };
        log::debug!("decision at {}: {:?}", position, options);
        Ok(options)
    }
}

/// `text[position]`, a ZWNJ, then the text after `position + skip`, cut to
/// `limit` characters
fn zwnj_variant(text: &[char], position: usize, skip: usize, limit: usize) -> Vec<char> {
    let mut variant = Vec::with_capacity(limit.min(text.len() + 1).max(2));
    variant.push(text[position]);
    variant.push(ZWNJ);
    variant.extend(
        text.iter()
            .skip(position + 1 + skip)
            .take(limit.saturating_sub(2)),
    );
    variant
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngram::NgramConfig;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn model() -> NgramModel {
        NgramModel::from_corpus(
            &NgramConfig::new().with_order(3),
            ["کېله\u{200C}جگی بویوک", "بیله\u{200C}ن کېلدی", "اوقه بېردی"],
        )
        .unwrap()
    }

    #[test]
    fn test_untrained_model() {
        let model = NgramModel::new();
        let engine = ZwnjDecisionEngine::new(&model);
        assert!(matches!(
            engine.decide(&chars("اه"), 1, None),
            Err(NgramError::NotTrained)
        ));
    }

    #[test]
    fn test_marker_at_end_of_text() {
        let model = model();
        let engine = ZwnjDecisionEngine::new(&model);
        let text = chars("اوقه");

        let options = engine.decide(&text, 3, None).unwrap();
        assert!(options.contains(ZwnjAction::NoChange));
        assert!(options.contains(ZwnjAction::InsertZwnj));
        assert!(!options.contains(ZwnjAction::ReplaceSpaceWithZwnj));
    }

    #[test]
    fn test_space_after_marker_offers_all_three() {
        let model = model();
        let engine = ZwnjDecisionEngine::new(&model);
        let text = chars("بیله ن");

        let options = engine.decide(&text, 3, None).unwrap();
        assert_eq!(options.iter().count(), 3);
    }

    #[test]
    fn test_position_past_end_offers_only_no_change() {
        let model = model();
        let engine = ZwnjDecisionEngine::new(&model);

        let options = engine.decide(&chars("اه"), 5, None).unwrap();
        assert_eq!(options.iter().count(), 1);

        let options = engine.decide(&chars("اه"), usize::MAX, None).unwrap();
        assert_eq!(options.iter().count(), 1);
    }

    #[test]
    fn test_variants_match_full_text_scores() {
        let model = model();
        let engine = ZwnjDecisionEngine::new(&model);
        let scorer = SequenceScorer::new(&model);
        let text = chars("کېله جگی بویوک");
        let window = engine.default_window();

        let options = engine.decide(&text, 3, None).unwrap();

        let inserted = chars("کېله\u{200C} جگی بویوک");
        let replaced = chars("کېله\u{200C}جگی بویوک");
        assert_eq!(options.no_change, scorer.score(&text, 3, window).unwrap());
        assert_eq!(
            options.insert_zwnj,
            Some(scorer.score(&inserted, 3, window + 1).unwrap())
        );
        assert_eq!(
            options.replace_space_with_zwnj,
            Some(scorer.score(&replaced, 3, window).unwrap())
        );
    }

    #[test]
    fn test_explicit_window() {
        let model = model();
        let engine = ZwnjDecisionEngine::new(&model);
        let scorer = SequenceScorer::new(&model);
        let text = chars("کېلهجگی بویوک");

        let options = engine.decide(&text, 3, Some(4)).unwrap();
        assert_eq!(options.no_change, scorer.score(&text, 3, 4).unwrap());
    }

    #[test]
    fn test_best_prefers_earlier_action_on_tie() {
        let all_equal = DecisionOptions {
            no_change: 0.25,
            insert_zwnj: Some(0.25),
            replace_space_with_zwnj: Some(0.25),
        };
        assert_eq!(all_equal.best().0, ZwnjAction::NoChange);

        let insert_and_replace = DecisionOptions {
            no_change: 0.1,
            insert_zwnj: Some(0.4),
            replace_space_with_zwnj: Some(0.4),
        };
        assert_eq!(insert_and_replace.best().0, ZwnjAction::InsertZwnj);

        let replace_wins = DecisionOptions {
            no_change: 0.1,
            insert_zwnj: Some(0.2),
            replace_space_with_zwnj: Some(0.3),
        };
        assert_eq!(replace_wins.best(), (ZwnjAction::ReplaceSpaceWithZwnj, 0.3));
    }

    #[test]
    fn test_confidence() {
        let options = DecisionOptions {
            no_change: 0.2,
            insert_zwnj: Some(0.6),
            replace_space_with_zwnj: None,
        };
        assert!((options.confidence() - 0.75).abs() < 1e-12);

        let zero = DecisionOptions {
            no_change: 0.0,
            insert_zwnj: Some(0.0),
            replace_space_with_zwnj: None,
        };
        assert_eq!(zero.confidence(), 0.0);
    }

    #[test]
    fn test_action_serialization() {
        assert_eq!(
            serde_json::to_string(&ZwnjAction::ReplaceSpaceWithZwnj).unwrap(),
            "\"replace_space_with_zwnj\""
        );
        assert_eq!(ZwnjAction::InsertZwnj.to_string(), "insert_zwnj");

        let options = DecisionOptions {
            no_change: 0.5,
            insert_zwnj: Some(0.25),
            replace_space_with_zwnj: None,
        };
        let json = serde_json::to_value(options).unwrap();
        assert_eq!(json["no_change"], 0.5);
        assert_eq!(json["insert_zwnj"], 0.25);
        assert!(json.get("replace_space_with_zwnj").is_none());
    }
}
