use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::{ActivationFunction, DEFAULT_RELU_BOUND};
use crate::error::Result;
use crate::network::{network::Network, topology::Topology};
use crate::train::train_config::{TrainConfig, DEFAULT_REPORT_EVERY};

/// Which activation the hidden layer uses.  The output layer is always sigmoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenActivation {
    #[default]
    Sigmoid,
    #[serde(alias = "relu")]
    ReluK,
}

/// Hyper-parameters of one training run, as read from a JSON file:
///
/// ```json
/// { "layers": [2, 2, 1], "learning_rate": 0.5, "epochs": 10000,
///   "target_mse": 0.01, "K_relu": 10.0, "hidden_activation": "relu_k" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub layers: Topology,
    pub learning_rate: f64,
    pub epochs: usize,
    pub target_mse: f64,
    #[serde(rename = "K_relu", default = "default_relu_bound")]
    pub relu_bound: f64,
    #[serde(default)]
    pub hidden_activation: HiddenActivation,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_report_every")]
    pub report_every: usize,
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,
}

fn default_relu_bound() -> f64 {
    DEFAULT_RELU_BOUND
}

fn default_report_every() -> usize {
    DEFAULT_REPORT_EVERY
}

impl RunConfig {
    pub fn from_json(text: &str) -> Result<RunConfig> {
        let config: RunConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<RunConfig> {
        let text = std::fs::read_to_string(path)?;
        RunConfig::from_json(&text)
    }

    /// Checks the topology, the activation bound and the training settings.
    pub fn validate(&self) -> Result<()> {
        self.layers.validate()?;
        self.hidden()?;
        self.train_config().validate()
    }

    /// Activation of the hidden layer, carrying `K_relu` for the bounded variant.
    pub fn hidden(&self) -> Result<ActivationFunction> {
        match self.hidden_activation {
            HiddenActivation::Sigmoid => Ok(ActivationFunction::Sigmoid),
            HiddenActivation::ReluK => ActivationFunction::bounded_relu(self.relu_bound),
        }
    }

    pub fn train_config(&self) -> TrainConfig {
        TrainConfig::new(self.learning_rate, self.epochs, self.target_mse)
            .with_report_every(self.report_every)
    }

    /// Seeded generator when `seed` is set, entropy-seeded otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Builds the network this configuration describes.
    pub fn build_network(&self, rng: &mut StdRng) -> Result<Network> {
        Network::new(self.layers, self.hidden()?, ActivationFunction::Sigmoid, rng)
    }
}
