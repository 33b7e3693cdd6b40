//! Windowed likelihood of a text span

use super::model::{NgramError, NgramModel};

/// Scores spans of text against an [`NgramModel`]
#[derive(Debug, Clone, Copy)]
pub struct SequenceScorer<'m> {
    model: &'m NgramModel,
}

impl<'m> SequenceScorer<'m> {
    pub fn new(model: &'m NgramModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &'m NgramModel {
        self.model
    }

    /// Geometric mean of the conditional n-gram probabilities in
    /// `text[start .. start + window_size]` (clipped to the text)
    ///
    /// Spans shorter than the model order get the joint probability of the
    /// whole span instead. The mean is taken in log space, which keeps
    /// spans with different n-gram counts comparable.
    pub fn score(
        &self,
        text: &[char],
        start: usize,
        window_size: usize,
    ) -> Result<f64, NgramError> {
        if !self.model.is_trained() {
            return Err(NgramError::NotTrained);
        }

        let n = self.model.order();
        let end = start.saturating_add(window_size).min(text.len());
        let span = if start < end { &text[start..end] } else { &[][..] };

        if span.len() < n {
            let sequence: String = span.iter().collect();
            return self.model.probability(&sequence, None);
        }

        let mut log_prob_sum = 0.0;
        let mut count = 0usize;

        for window in span.windows(n) {
            let ngram: String = window.iter().collect();
            let split = ngram.len() - window[n - 1].len_utf8();
            let prob = self.model.probability(&ngram, Some(&ngram[..split]))?;
            log_prob_sum += prob.ln();
            count += 1;
        }

        Ok((log_prob_sum / count as f64).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngram::NgramConfig;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn model(order: usize) -> NgramModel {
        NgramModel::from_corpus(
            &NgramConfig::new().with_order(order),
            ["abcabcabc", "abcd"],
        )
        .unwrap()
    }

    #[test]
    fn test_untrained_model() {
        let model = NgramModel::new();
        let scorer = SequenceScorer::new(&model);
        assert!(matches!(
            scorer.score(&chars("abcd"), 0, 8),
            Err(NgramError::NotTrained)
        ));
    }

    #[test]
    fn test_short_span_uses_joint_probability() {
        let model = model(3);
        let scorer = SequenceScorer::new(&model);
        let text = chars("abcabc");

        // span "bc" has 2 < 3 chars
        let score = scorer.score(&text, 4, 8).unwrap();
        let joint = model.probability("bc", None).unwrap();
        assert!((score - joint).abs() < 1e-15);
    }

    #[test]
    fn test_start_past_end_scores_empty_span() {
        let model = model(3);
        let scorer = SequenceScorer::new(&model);

        let score = scorer.score(&chars("abc"), 10, 4).unwrap();
        let empty = model.probability("", None).unwrap();
        assert!((score - empty).abs() < 1e-15);
    }

    #[test]
    fn test_geometric_mean() {
        let model = model(2);
        let scorer = SequenceScorer::new(&model);
        let text = chars("abca");

        let p1 = model.probability("ab", Some("a")).unwrap();
        let p2 = model.probability("bc", Some("b")).unwrap();
        let p3 = model.probability("ca", Some("c")).unwrap();
        let expected = (p1 * p2 * p3).powf(1.0 / 3.0);

        let score = scorer.score(&text, 0, 10).unwrap();
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_window_is_clipped() {
        let model = model(2);
        let scorer = SequenceScorer::new(&model);
        let text = chars("abcabc");

        let clipped = scorer.score(&text, 3, 100).unwrap();
        let exact = scorer.score(&text, 3, 3).unwrap();
        assert!((clipped - exact).abs() < 1e-15);
    }

    #[test]
    fn test_seen_text_scores_higher() {
        let model = model(3);
        let scorer = SequenceScorer::new(&model);

        let seen = scorer.score(&chars("abcabc"), 0, 6).unwrap();
        let unseen = scorer.score(&chars("cbacba"), 0, 6).unwrap();
        assert!(seen > unseen);
        assert!(seen > 0.0 && seen <= 1.0);
    }
}
