pub mod activation;

pub use activation::{ActivationFunction, sigmoid, relu_k, d_relu_k, DEFAULT_RELU_BOUND};
