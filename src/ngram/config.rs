//! N-gram model settings
//!
//! Order and smoothing of a model. The scoring window is chosen per call,
//! see [`ZwnjDecisionEngine::decide`](super::ZwnjDecisionEngine::decide).

/// Default n-gram order
pub const DEFAULT_ORDER: usize = 4;

/// Default Laplace smoothing constant
pub const DEFAULT_SMOOTHING: f64 = 1e-6;

/// N-gram model settings
#[derive(Debug, Clone)]
pub struct NgramConfig {
    /// Number of characters per n-gram
    pub order: usize,

    /// Add-k (Laplace) smoothing constant.
    /// Keeps unseen n-grams above zero probability.
    pub smoothing: f64,
}

impl Default for NgramConfig {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

impl NgramConfig {
    /// New config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the n-gram order
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Set the smoothing constant
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Reject settings no model can be built with
    pub fn validate(&self) -> Result<(), String> {
        if self.order == 0 {
            return Err("n-gram order must be at least 1".into());
        }
        if i32::try_from(self.order).is_err() {
            return Err(format!("n-gram order {} is too large", self.order));
        }
        if !self.smoothing.is_finite() || self.smoothing <= 0.0 {
            return Err(format!(
                "smoothing must be a positive finite number, got {}",
                self.smoothing
            ));
        }
        Ok(())
    }
}
