/// Sum of squared differences `Σ (t - o)²` for one example.
pub fn squared_error(outputs: &[f64], targets: &[f64]) -> f64 {
    outputs.iter().zip(targets.iter())
        .map(|(o, t)| (t - o).powi(2))
        .sum()
}

/// Binary decision for a value in `[0, 1]`: 1 at or above one half.
pub fn classify(value: f64) -> u8 {
    if value >= 0.5 { 1 } else { 0 }
}

/// Running totals over the examples of a single epoch.
///
/// Start a fresh value at the top of every epoch; nothing carries over.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EpochMetrics {
    sum_squared_error: f64,
    correct: usize,
    seen: usize,
}

impl EpochMetrics {
    pub fn new() -> EpochMetrics {
        EpochMetrics::default()
    }

    /// Folds one example's forward result into the totals.  Accuracy is
    /// only counted for single-output networks.
    pub fn record(&mut self, outputs: &[f64], targets: &[f64]) {
        self.sum_squared_error += squared_error(outputs, targets);
        if let ([o], [t]) = (outputs, targets) {
            if classify(*o) == classify(*t) {
                self.correct += 1;
            }
        }
        self.seen += 1;
    }

    pub fn sum_squared_error(&self) -> f64 {
        self.sum_squared_error
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn seen(&self) -> usize {
        self.seen
    }

    /// Half the mean squared error over the examples seen so far.
    pub fn mse(&self) -> f64 {
        if self.seen == 0 {
            return 0.0;
        }
        0.5 * self.sum_squared_error / self.seen as f64
    }

    /// Fraction of examples classified correctly.
    pub fn accuracy(&self) -> f64 {
        if self.seen == 0 {
            return 0.0;
        }
        self.correct as f64 / self.seen as f64
    }
}
