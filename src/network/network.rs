use rand::Rng;

use crate::{activation::activation::ActivationFunction, layers::dense::Layer};
use crate::error::{NetError, Result};
use crate::network::topology::Topology;

/// Intermediate values of one forward pass, needed by the backward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPass {
    pub hidden_potentials: Vec<f64>,
    pub hidden_outputs: Vec<f64>,
    pub output_potentials: Vec<f64>,
    pub outputs: Vec<f64>,
}

/// Two-layer perceptron: input -> hidden -> output.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    hidden: Layer,
    output: Layer,
}

impl Network {
    /// Builds a network with freshly drawn parameters.
    ///
    /// Draw order is `W_ih`, `B_h`, `W_ho`, `B_o`, so a given seed always
    /// produces the same network.
    pub fn new<R: Rng + ?Sized>(
        topology: Topology,
        hidden_activation: ActivationFunction,
        output_activation: ActivationFunction,
        rng: &mut R,
    ) -> Result<Network> {
        topology.validate()?;
        let hidden = Layer::new(topology.hidden_size, topology.input_size, hidden_activation, rng)?;
        let output = Layer::new(topology.output_size, topology.hidden_size, output_activation, rng)?;
        Ok(Network { hidden, output })
    }

    /// Assembles a network from existing layers.
    pub fn from_layers(hidden: Layer, output: Layer) -> Result<Network> {
        NetError::check_len("output layer fan-in", hidden.size, output.input_size())?;
        Ok(Network { hidden, output })
    }

    pub fn topology(&self) -> Topology {
        Topology::new(self.hidden.input_size(), self.hidden.size, self.output.size)
    }

    pub fn hidden_layer(&self) -> &Layer {
        &self.hidden
    }

    pub fn output_layer(&self) -> &Layer {
        &self.output
    }

    /// Forward pass.  Reads the parameters only.
    pub fn forward(&self, inputs: &[f64]) -> Result<ForwardPass> {
        NetError::check_len("network inputs", self.hidden.input_size(), inputs.len())?;

        let hidden_potentials = self.hidden.potentials(inputs)?;
        let hidden_outputs = self.hidden.activate(&hidden_potentials);
        let output_potentials = self.output.potentials(&hidden_outputs)?;
        let outputs = self.output.activate(&output_potentials);

        Ok(ForwardPass {
            hidden_potentials,
            hidden_outputs,
            output_potentials,
            outputs,
        })
    }

    /// Backpropagates the error of `pass` against `targets` and moves every
    /// parameter by `learning_rate` along the error-reducing direction.
    ///
    /// All shapes are checked before anything is written, so on error the
    /// network is left untouched.
    pub fn backward_and_update(
        &mut self,
        inputs: &[f64],
        pass: &ForwardPass,
        targets: &[f64],
        learning_rate: f64,
    ) -> Result<()> {
        let topology = self.topology();
        NetError::check_len("network inputs", topology.input_size, inputs.len())?;
        NetError::check_len("targets", topology.output_size, targets.len())?;
        NetError::check_len("output activations", topology.output_size, pass.outputs.len())?;
        NetError::check_len("output potentials", topology.output_size, pass.output_potentials.len())?;
        NetError::check_len("hidden activations", topology.hidden_size, pass.hidden_outputs.len())?;
        NetError::check_len("hidden potentials", topology.hidden_size, pass.hidden_potentials.len())?;

        let error: Vec<f64> = targets.iter().zip(&pass.outputs).map(|(t, o)| t - o).collect();
        let delta_o = self.output.deltas(&pass.output_potentials, &pass.outputs, &error);

        // Hidden error must see W_ho before it is updated.
        let hidden_error = self.output.propagate(&delta_o)?;
        let delta_h = self.hidden.deltas(&pass.hidden_potentials, &pass.hidden_outputs, &hidden_error);

        self.output.apply_deltas(&pass.hidden_outputs, &delta_o, learning_rate)?;
        self.hidden.apply_deltas(inputs, &delta_h, learning_rate)?;
        Ok(())
    }

    /// Output activations for `inputs`.
    pub fn predict(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        Ok(self.forward(inputs)?.outputs)
    }

    /// Binary class of a single-output network: 1 when the output is at least 0.5.
    pub fn predict_class(&self, inputs: &[f64]) -> Result<u8> {
        NetError::check_len("classifier outputs", 1, self.output.size)?;
        let outputs = self.predict(inputs)?;
        Ok(crate::metrics::classify(outputs[0]))
    }
}
