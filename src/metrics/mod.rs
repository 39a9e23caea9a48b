pub mod epoch_metrics;

pub use epoch_metrics::{EpochMetrics, squared_error, classify};
