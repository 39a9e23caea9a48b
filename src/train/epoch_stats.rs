use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `TrainingLoop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the loop
/// sends one `EpochStats` value at the end of every completed epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Epoch budget for this run.
    pub total_epochs: usize,
    /// Half the mean squared error over the epoch.
    pub mse: f64,
    /// Fraction of examples classified correctly; only set for single-output networks.
    pub accuracy: Option<f64>,
}
