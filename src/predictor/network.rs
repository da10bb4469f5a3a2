//! Feed-forward network: 5 inputs, 10 ReLU units, 1 sigmoid output.

use crate::features::FEATURE_DIM;

pub const HIDDEN_UNITS: usize = 10;

/// Total number of trainable parameters.
pub const PARAM_COUNT: usize = HIDDEN_UNITS * FEATURE_DIM + HIDDEN_UNITS + HIDDEN_UNITS + 1;

/// Parameters of the strength network.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    pub hidden_weights: [[f64; FEATURE_DIM]; HIDDEN_UNITS],
    pub hidden_bias: [f64; HIDDEN_UNITS],
    pub output_weights: [f64; HIDDEN_UNITS],
    pub output_bias: f64,
}

impl Network {
    /// All-zero network. Used as the gradient accumulator during training.
    pub fn zeros() -> Self {
        Self {
            hidden_weights: [[0.0; FEATURE_DIM]; HIDDEN_UNITS],
            hidden_bias: [0.0; HIDDEN_UNITS],
            output_weights: [0.0; HIDDEN_UNITS],
            output_bias: 0.0,
        }
    }

    /// Hidden layer activations for one input.
    pub fn hidden(&self, input: &[f64; FEATURE_DIM]) -> [f64; HIDDEN_UNITS] {
        let mut out = [0.0; HIDDEN_UNITS];
        for (j, unit) in out.iter_mut().enumerate() {
            let mut acc = self.hidden_bias[j];
            for (w, x) in self.hidden_weights[j].iter().zip(input) {
                acc += w * x;
            }
            *unit = relu(acc);
        }
        out
    }

    /// Output for a hidden layer already computed by [`Network::hidden`].
    pub fn output(&self, hidden: &[f64; HIDDEN_UNITS]) -> f64 {
        let mut z = self.output_bias;
        for (w, h) in self.output_weights.iter().zip(hidden) {
            z += w * h;
        }
        sigmoid(z)
    }

    /// Predicted strength in `[0, 1]`.
    pub fn forward(&self, input: &[f64; FEATURE_DIM]) -> f64 {
        self.output(&self.hidden(input))
    }

    /// Parameters in a fixed order: hidden weights (row-major), hidden bias,
    /// output weights, output bias.
    pub fn params(&self) -> impl Iterator<Item = &f64> {
        self.hidden_weights
            .iter()
            .flatten()
            .chain(self.hidden_bias.iter())
            .chain(self.output_weights.iter())
            .chain(std::iter::once(&self.output_bias))
    }

    /// Mutable counterpart of [`Network::params`], same order.
    pub fn params_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.hidden_weights
            .iter_mut()
            .flatten()
            .chain(self.hidden_bias.iter_mut())
            .chain(self.output_weights.iter_mut())
            .chain(std::iter::once(&mut self.output_bias))
    }

    pub fn is_finite(&self) -> bool {
        self.params().all(|p| p.is_finite())
    }
}

fn relu(x: f64) -> f64 {
    if x > 0.0 { x } else { 0.0 }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
