/// One training example: an input vector and the target output vector.
///
/// Immutable once built; the fields are only exposed as slices.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    inputs: Vec<f64>,
    targets: Vec<f64>,
}

impl Example {
    pub fn new(inputs: Vec<f64>, targets: Vec<f64>) -> Example {
        Example { inputs, targets }
    }

    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }
}
