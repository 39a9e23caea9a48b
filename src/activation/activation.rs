use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};

/// Upper bound used by `BoundedReLU` when none is configured.
pub const DEFAULT_RELU_BOUND: f64 = 10.0;

/// Logistic sigmoid.  Never overflows: for large `|x|` it saturates to 0 or 1.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        // exp(x) underflows to 0 instead of exp(-x) overflowing to inf.
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// ReLU clamped to `[0, k]`.
pub fn relu_k(x: f64, k: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else if x < k {
        x
    } else {
        k
    }
}

/// Derivative of `relu_k`: 1 strictly inside `(0, k)`, 0 everywhere else,
/// including both kinks.
pub fn d_relu_k(x: f64, k: f64) -> f64 {
    if 0.0 < x && x < k { 1.0 } else { 0.0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
    BoundedReLU { k: f64 },
}

impl ActivationFunction {
    /// Bounded ReLU with an explicit bound.  `k` must be finite and positive.
    pub fn bounded_relu(k: f64) -> Result<ActivationFunction> {
        let activation = ActivationFunction::BoundedReLU { k };
        activation.validate()?;
        Ok(activation)
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            ActivationFunction::Sigmoid => Ok(()),
            ActivationFunction::BoundedReLU { k } if k.is_finite() && k > 0.0 => Ok(()),
            ActivationFunction::BoundedReLU { k } => Err(NetError::invalid(format!(
                "bounded ReLU bound must be a positive finite number, got {k}"
            ))),
        }
    }

    pub fn function(&self, x: f64) -> f64 {
        match *self {
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::BoundedReLU { k } => relu_k(x, k),
        }
    }

    /// Element-wise derivative at a neuron whose potential was `potential` and
    /// whose activation came out as `output`.
    ///
    /// Sigmoid uses the `o * (1 - o)` shortcut on the output; bounded ReLU
    /// looks at the potential, since its output loses which side of a kink
    /// the neuron sits on.
    pub fn derivative(&self, potential: f64, output: f64) -> f64 {
        match *self {
            ActivationFunction::Sigmoid => output * (1.0 - output),
            ActivationFunction::BoundedReLU { k } => d_relu_k(potential, k),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_half_at_zero() {
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn sigmoid_stays_strictly_inside_unit_interval() {
        let mut x = -30.0;
        while x <= 30.0 {
            let y = sigmoid(x);
            assert!(y > 0.0 && y < 1.0, "sigmoid({x}) = {y}");
            x += 0.25;
        }
    }

    #[test]
    fn sigmoid_saturates_without_overflow() {
        for x in [-1e6, -1000.0, -750.0, 750.0, 1000.0, 1e6, f64::MAX, f64::MIN] {
            let y = sigmoid(x);
            assert!(y.is_finite());
            assert!((0.0..=1.0).contains(&y));
        }
        assert_eq!(sigmoid(f64::MIN), 0.0);
        assert_eq!(sigmoid(f64::MAX), 1.0);
    }

    #[test]
    fn sigmoid_is_symmetric() {
        for x in [0.1, 1.0, 2.5, 7.0] {
            assert!((sigmoid(x) + sigmoid(-x) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn relu_k_clamps_to_bound() {
        let k = 10.0;
        for x in [-100.0, -1.0, 0.0, 0.5, 3.0, 9.999, 10.0, 10.001, 1e9] {
            let y = relu_k(x, k);
            assert!((0.0..=k).contains(&y), "relu_k({x}) = {y}");
        }
        assert_eq!(relu_k(0.0, k), 0.0);
        assert_eq!(relu_k(k, k), k);
        assert_eq!(relu_k(3.0, k), 3.0);
        assert_eq!(relu_k(42.0, k), k);
    }

    #[test]
    fn d_relu_k_is_one_only_strictly_inside() {
        let k = 2.0;
        assert_eq!(d_relu_k(0.0, k), 0.0);
        assert_eq!(d_relu_k(k, k), 0.0);
        assert_eq!(d_relu_k(-0.5, k), 0.0);
        assert_eq!(d_relu_k(2.5, k), 0.0);
        assert_eq!(d_relu_k(1e-12, k), 1.0);
        assert_eq!(d_relu_k(1.0, k), 1.0);
        assert_eq!(d_relu_k(1.999, k), 1.0);
    }

    #[test]
    fn sigmoid_derivative_uses_output_shortcut() {
        let act = ActivationFunction::Sigmoid;
        // potential is ignored
        assert_eq!(act.derivative(123.0, 0.5), 0.25);
        assert_eq!(act.derivative(-4.0, 0.25), 0.1875);
    }

    #[test]
    fn bounded_relu_derivative_uses_potential() {
        let act = ActivationFunction::BoundedReLU { k: 10.0 };
        assert_eq!(act.derivative(5.0, 5.0), 1.0);
        assert_eq!(act.derivative(10.0, 10.0), 0.0);
        assert_eq!(act.derivative(0.0, 0.0), 0.0);
    }

    #[test]
    fn bounded_relu_rejects_bad_bounds() {
        assert!(ActivationFunction::bounded_relu(10.0).is_ok());
        for k in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                ActivationFunction::bounded_relu(k),
                Err(NetError::InvalidConfiguration(_))
            ));
        }
    }
}
