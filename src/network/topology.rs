use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};

/// Neuron counts for the input, hidden and output layers.
///
/// Serialized as a three-element array (`[2, 2, 1]`), matching the `layers`
/// key of a run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 3]", into = "[usize; 3]")]
pub struct Topology {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
}

impl Topology {
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Topology {
        Topology { input_size, hidden_size, output_size }
    }

    /// The 2-2-1 layout used for XOR.
    pub fn xor() -> Topology {
        Topology::new(2, 2, 1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 || self.hidden_size == 0 || self.output_size == 0 {
            return Err(NetError::invalid(format!(
                "every layer needs at least one neuron, got {self}"
            )));
        }
        Ok(())
    }
}

impl From<[usize; 3]> for Topology {
    fn from([input_size, hidden_size, output_size]: [usize; 3]) -> Self {
        Topology { input_size, hidden_size, output_size }
    }
}

impl From<Topology> for [usize; 3] {
    fn from(t: Topology) -> Self {
        [t.input_size, t.hidden_size, t.output_size]
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.input_size, self.hidden_size, self.output_size)
    }
}
