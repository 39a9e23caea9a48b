use serde::{Serialize, Deserialize};
use tracing::{debug, info, warn};

use crate::data::dataset::Dataset;
use crate::error::{NetError, Result};
use crate::metrics::epoch_metrics::EpochMetrics;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Where a `TrainingLoop` stands.  `Converged` and `Exhausted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingState {
    Running,
    /// An epoch's mse reached `target_mse`.
    Converged,
    /// The epoch budget ran out first.
    Exhausted,
}

/// Final outcome of a run, captured at the epoch that ended it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub outcome: TrainingState,
    pub epoch: usize,
    pub mse: f64,
    pub accuracy: Option<f64>,
    /// mse of every completed epoch, in order.
    pub history: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Epoch-level helpers
// ---------------------------------------------------------------------------

/// One online-SGD pass over `dataset` in order: forward, record, then update,
/// example by example.
pub fn run_epoch(network: &mut Network, dataset: &Dataset, learning_rate: f64) -> Result<EpochMetrics> {
    let mut metrics = EpochMetrics::new();

    for example in dataset {
        let pass = network.forward(example.inputs())?;
        metrics.record(&pass.outputs, example.targets());
        network.backward_and_update(example.inputs(), &pass, example.targets(), learning_rate)?;
    }

    Ok(metrics)
}

/// Scores `network` on `dataset` without touching its parameters.
pub fn evaluate(network: &Network, dataset: &Dataset) -> Result<EpochMetrics> {
    let mut metrics = EpochMetrics::new();
    for example in dataset {
        let outputs = network.predict(example.inputs())?;
        metrics.record(&outputs, example.targets());
    }
    Ok(metrics)
}

// ---------------------------------------------------------------------------
// TrainingLoop
// ---------------------------------------------------------------------------

/// Drives a single network over a fixed dataset until it converges or the
/// epoch budget is spent.
pub struct TrainingLoop {
    network: Network,
    dataset: Dataset,
    config: TrainConfig,
    state: TrainingState,
    epoch: usize,
    last: Option<EpochStats>,
    history: Vec<f64>,
}

impl TrainingLoop {
    /// Validates the whole run up front.
    ///
    /// Fails with `InvalidConfiguration` for a bad config or an empty dataset,
    /// and with `ShapeMismatch` if the dataset does not fit the network.
    pub fn new(network: Network, dataset: Dataset, config: TrainConfig) -> Result<TrainingLoop> {
        config.validate()?;
        if dataset.is_empty() {
            return Err(NetError::invalid("dataset must contain at least one example"));
        }
        network.hidden_layer().activation().validate()?;
        network.output_layer().activation().validate()?;
        dataset.check_topology(&network.topology())?;

        Ok(TrainingLoop {
            network,
            dataset,
            config,
            state: TrainingState::Running,
            epoch: 1,
            last: None,
            history: Vec::new(),
        })
    }

    pub fn state(&self) -> TrainingState {
        self.state
    }

    /// The epoch that will run next, or the one that ended the run.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn last_stats(&self) -> Option<&EpochStats> {
        self.last.as_ref()
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    /// Runs one epoch and applies the stopping policy.  Once the loop is in
    /// a terminal state this is a no-op that returns that state.
    pub fn step(&mut self) -> Result<TrainingState> {
        if self.state != TrainingState::Running {
            return Ok(self.state);
        }

        let metrics = run_epoch(&mut self.network, &self.dataset, self.config.learning_rate)?;
        let stats = EpochStats {
            epoch: self.epoch,
            total_epochs: self.config.epochs,
            mse: metrics.mse(),
            accuracy: (self.dataset.output_size() == 1).then(|| metrics.accuracy()),
        };
        self.history.push(stats.mse);
        debug!(epoch = stats.epoch, mse = stats.mse, "epoch done");

        if let Some(ref tx) = self.config.progress_tx {
            // Nobody listening is fine; the run still finishes on its own terms.
            let _ = tx.send(stats.clone());
        }

        if stats.mse <= self.config.target_mse {
            self.state = TrainingState::Converged;
            info!(
                epoch = stats.epoch,
                mse = stats.mse,
                accuracy = ?stats.accuracy,
                "converged: target mse {} reached",
                self.config.target_mse
            );
        } else if self.epoch >= self.config.epochs {
            self.state = TrainingState::Exhausted;
            warn!(
                epoch = stats.epoch,
                mse = stats.mse,
                accuracy = ?stats.accuracy,
                "exhausted: epoch budget spent above target mse {}",
                self.config.target_mse
            );
        } else {
            if stats.epoch == 1 || stats.epoch % self.config.report_every == 0 {
                info!(epoch = stats.epoch, mse = stats.mse, accuracy = ?stats.accuracy, "training");
            }
            self.epoch += 1;
        }

        self.last = Some(stats);
        Ok(self.state)
    }

    /// Steps until a terminal state and reports the epoch that ended the run.
    pub fn run(&mut self) -> Result<TrainingReport> {
        while self.step()? == TrainingState::Running {}
        self.report()
    }

    /// Snapshot of the terminal outcome.  Fails while the loop is still running.
    pub fn report(&self) -> Result<TrainingReport> {
        match (&self.last, self.state) {
            (Some(last), TrainingState::Converged | TrainingState::Exhausted) => Ok(TrainingReport {
                outcome: self.state,
                epoch: last.epoch,
                mse: last.mse,
                accuracy: last.accuracy,
                history: self.history.clone(),
            }),
            _ => Err(NetError::invalid("training has not finished yet")),
        }
    }
}
