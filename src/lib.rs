pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod metrics;
pub mod data;
pub mod train;
pub mod config;

// Convenience re-exports
pub use error::{NetError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{Network, ForwardPass, Topology};
pub use metrics::EpochMetrics;
pub use data::{Dataset, Example};
pub use train::{TrainingLoop, TrainingState, TrainingReport, TrainConfig, EpochStats};
pub use config::{RunConfig, HiddenActivation};
