use crate::data::example::Example;
use crate::error::{NetError, Result};
use crate::network::topology::Topology;

/// An ordered collection of examples sharing one input and one output arity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    examples: Vec<Example>,
    input_size: usize,
    output_size: usize,
}

impl Dataset {
    /// Takes the arity from the first example and requires every other
    /// example to match it.  An empty dataset has arity zero.
    pub fn new(examples: Vec<Example>) -> Result<Dataset> {
        let (input_size, output_size) = match examples.first() {
            Some(first) => (first.inputs().len(), first.targets().len()),
            None => (0, 0),
        };
        for example in &examples {
            NetError::check_len("example inputs", input_size, example.inputs().len())?;
            NetError::check_len("example targets", output_size, example.targets().len())?;
        }

        Ok(Dataset { examples, input_size, output_size })
    }

    /// The four rows of the XOR truth table.
    pub fn xor_truth_table() -> Dataset {
        let examples = [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)]
            .into_iter()
            .map(|(a, b): (f64, f64)| {
                let y = if (a != 0.0) != (b != 0.0) { 1.0 } else { 0.0 };
                Example::new(vec![a, b], vec![y])
            })
            .collect();
        Dataset { examples, input_size: 2, output_size: 1 }
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Example> {
        self.examples.iter()
    }

    /// Fails with `ShapeMismatch` unless the dataset fits `topology`.
    pub fn check_topology(&self, topology: &Topology) -> Result<()> {
        NetError::check_len("example inputs", topology.input_size, self.input_size)?;
        NetError::check_len("example targets", topology.output_size, self.output_size)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Example;
    type IntoIter = std::slice::Iter<'a, Example>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truth_table_is_xor() {
        let data = Dataset::xor_truth_table();
        let rows: Vec<(Vec<f64>, f64)> = data.iter()
            .map(|e| (e.inputs().to_vec(), e.targets()[0]))
            .collect();
        assert_eq!(rows, vec![
            (vec![0.0, 0.0], 0.0),
            (vec![0.0, 1.0], 1.0),
            (vec![1.0, 0.0], 1.0),
            (vec![1.0, 1.0], 0.0),
        ]);
        assert!(data.check_topology(&Topology::xor()).is_ok());
    }

    #[test]
    fn mixed_arity_is_rejected() {
        let err = Dataset::new(vec![
            Example::new(vec![0.0, 1.0], vec![1.0]),
            Example::new(vec![0.0], vec![1.0]),
        ]).unwrap_err();
        assert!(matches!(err, NetError::ShapeMismatch { expected: 2, actual: 1, .. }));

        assert!(Dataset::new(vec![
            Example::new(vec![0.0, 1.0], vec![1.0]),
            Example::new(vec![0.0, 1.0], vec![1.0, 0.0]),
        ]).is_err());
    }

    #[test]
    fn topology_check_reports_mismatch() {
        let data = Dataset::xor_truth_table();
        assert!(data.check_topology(&Topology::new(3, 2, 1)).is_err());
        assert!(data.check_topology(&Topology::new(2, 2, 2)).is_err());
    }

    #[test]
    fn empty_dataset_is_allowed_here() {
        let data = Dataset::new(vec![]).unwrap();
        assert!(data.is_empty());
        assert_eq!(data.input_size(), 0);
    }
}
