use rand::Rng;

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};
use crate::error::{NetError, Result};

/// Half-width of the uniform range parameters are drawn from.
pub const INIT_RANGE: f64 = 0.5;

/// One fully-connected layer: `weights` is `input_size x size`, one bias per neuron.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub size: usize,
    weights: Matrix,
    biases: Vec<f64>,
    activator: ActivationFunction,
}

impl Layer {
    /// Draws weights, then biases, from `U[-INIT_RANGE, INIT_RANGE]`.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Result<Layer> {
        if size == 0 || input_size == 0 {
            return Err(NetError::invalid(format!(
                "layer dimensions must be positive, got {input_size} -> {size}"
            )));
        }
        activation.validate()?;

        let weights = Matrix::uniform(input_size, size, -INIT_RANGE, INIT_RANGE, rng);
        let biases = Matrix::uniform(1, size, -INIT_RANGE, INIT_RANGE, rng).row(0).to_vec();

        Ok(Layer {
            size,
            weights,
            biases,
            activator: activation,
        })
    }

    /// Builds a layer from explicit parameters.
    pub fn from_parts(weights: Matrix, biases: Vec<f64>, activation: ActivationFunction) -> Result<Layer> {
        NetError::check_len("bias vector", weights.cols(), biases.len())?;
        activation.validate()?;
        Ok(Layer {
            size: weights.cols(),
            weights,
            biases,
            activator: activation,
        })
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows()
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activator
    }

    /// Pre-activation values `z = x W + b`.
    pub fn potentials(&self, input: &[f64]) -> Result<Vec<f64>> {
        let mut z = self.weights.vec_mul(input)?;
        for (zj, bj) in z.iter_mut().zip(&self.biases) {
            *zj += bj;
        }
        Ok(z)
    }

    pub fn activate(&self, potentials: &[f64]) -> Vec<f64> {
        potentials.iter().map(|&z| self.activator.function(z)).collect()
    }

    /// Error terms `δ = f'(z) * error`, element-wise.
    pub fn deltas(&self, potentials: &[f64], outputs: &[f64], error: &[f64]) -> Vec<f64> {
        potentials.iter().zip(outputs).zip(error)
            .map(|((&z, &a), &e)| self.activator.derivative(z, a) * e)
            .collect()
    }

    /// Error signal reaching the previous layer: `Σ_k δ[k] * W[j][k]`.
    pub fn propagate(&self, deltas: &[f64]) -> Result<Vec<f64>> {
        self.weights.mul_vec(deltas)
    }

    /// Moves weights and biases along `δ`, scaled by `lr`.
    pub fn apply_deltas(&mut self, inputs: &[f64], deltas: &[f64], lr: f64) -> Result<()> {
        NetError::check_len("layer deltas", self.size, deltas.len())?;
        self.weights.add_outer(lr, inputs, deltas)?;
        for (b, d) in self.biases.iter_mut().zip(deltas) {
            *b += lr * d;
        }
        Ok(())
    }
}
