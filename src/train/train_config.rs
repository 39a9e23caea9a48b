use std::sync::mpsc;

use crate::error::{NetError, Result};
use crate::train::epoch_stats::EpochStats;

/// Epochs between two progress reports when none is configured.
pub const DEFAULT_REPORT_EVERY: usize = 500;

/// Configuration for a `TrainingLoop` run.
///
/// # Fields
/// - `learning_rate` — step size of every parameter update
/// - `epochs`        — hard upper bound on full passes over the dataset
/// - `target_mse`    — training stops as soon as an epoch's mse is at or below this
/// - `report_every`  — progress is logged for epoch 1 and every multiple of this
/// - `progress_tx`   — optional channel sender; one `EpochStats` is sent per
///                     completed epoch.  A dropped receiver does not stop training.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    pub target_mse: f64,
    pub report_every: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with the default report cadence and no progress channel.
    pub fn new(learning_rate: f64, epochs: usize, target_mse: f64) -> Self {
        TrainConfig {
            learning_rate,
            epochs,
            target_mse,
            report_every: DEFAULT_REPORT_EVERY,
            progress_tx: None,
        }
    }

    pub fn with_report_every(mut self, report_every: usize) -> Self {
        self.report_every = report_every;
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(NetError::invalid("epochs must be at least 1"));
        }
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(NetError::invalid(format!(
                "learning_rate must be a non-negative finite number, got {}",
                self.learning_rate
            )));
        }
        if !self.target_mse.is_finite() || self.target_mse < 0.0 {
            return Err(NetError::invalid(format!(
                "target_mse must be a non-negative finite number, got {}",
                self.target_mse
            )));
        }
        if self.report_every == 0 {
            return Err(NetError::invalid("report_every must be at least 1"));
        }
        Ok(())
    }
}
