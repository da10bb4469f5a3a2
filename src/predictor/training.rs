//! Offline trainer for the strength network.
//!
//! Fits the network to the five reference archetypes with full-batch Adam
//! and binary cross-entropy. Deterministic: the same constants always give
//! the same parameters, which is how `weights.rs` was produced.
//!
//! Both weight layers are projected onto `>= 0` after every step. With
//! ReLU and sigmoid activations this makes the output non-decreasing in
//! every input: more length or another character class never lowers the
//! score. Biases stay unconstrained.

use super::PredictorError;
use super::network::{HIDDEN_UNITS, Network, PARAM_COUNT};
use crate::features::FEATURE_DIM;

/// Hand-labeled reference points: `[length, lower, upper, digit, special]` and target score.
pub const TRAINING_SET: [([f64; FEATURE_DIM], f64); 5] = [
    ([8.0, 1.0, 1.0, 1.0, 1.0], 0.9),  // strong
    ([4.0, 1.0, 0.0, 0.0, 0.0], 0.2),  // weak
    ([12.0, 1.0, 1.0, 1.0, 0.0], 0.6), // moderate
    ([16.0, 1.0, 1.0, 1.0, 1.0], 1.0), // very strong
    ([6.0, 1.0, 1.0, 0.0, 0.0], 0.3),  // weak
];

pub const EPOCHS: usize = 2000;
pub const LEARNING_RATE: f64 = 0.01;
pub const SEED: u64 = 0x5E_ED0F_CAFE;

const BETA1: f64 = 0.9;
const BETA2: f64 = 0.999;
const ADAM_EPSILON: f64 = 1e-8;
const LOSS_EPSILON: f64 = 1e-7;

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub network: Network,
    /// Mean binary cross-entropy over [`TRAINING_SET`] after the last epoch.
    pub loss: f64,
}

// Deterministic PRNG (xorshift64)
struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform in `[0, 1)` from the top 53 bits.
    fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[0, limit)`.
    fn next_scaled(&mut self, limit: f64) -> f64 {
        self.next_unit() * limit
    }
}

/// Glorot-uniform magnitudes (non-negative half), zero biases.
fn initial_network(seed: u64) -> Network {
    let mut rng = Xorshift64::new(seed);
    let mut network = Network::zeros();

    let hidden_limit = (6.0 / (FEATURE_DIM + HIDDEN_UNITS) as f64).sqrt();
    for row in network.hidden_weights.iter_mut() {
        for w in row.iter_mut() {
            *w = rng.next_scaled(hidden_limit);
        }
    }

    let output_limit = (6.0 / (HIDDEN_UNITS + 1) as f64).sqrt();
    for w in network.output_weights.iter_mut() {
        *w = rng.next_scaled(output_limit);
    }

    network
}

/// Mean binary cross-entropy of `network` over [`TRAINING_SET`].
pub fn loss(network: &Network) -> f64 {
    let total: f64 = TRAINING_SET
        .iter()
        .map(|(x, y)| {
            let p = network.forward(x).clamp(LOSS_EPSILON, 1.0 - LOSS_EPSILON);
            -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        })
        .sum();
    total / TRAINING_SET.len() as f64
}

/// Gradient of [`loss`] with respect to every parameter.
fn gradient(network: &Network) -> Network {
    let n = TRAINING_SET.len() as f64;
    let mut grad = Network::zeros();

    for (x, y) in TRAINING_SET.iter() {
        let hidden = network.hidden(x);
        let p = network.output(&hidden);
        // d(BCE)/dz for a sigmoid output
        let dz = (p - y) / n;

        grad.output_bias += dz;
        for j in 0..HIDDEN_UNITS {
            grad.output_weights[j] += dz * hidden[j];
            if hidden[j] > 0.0 {
                let dh = dz * network.output_weights[j];
                grad.hidden_bias[j] += dh;
                for (g, xi) in grad.hidden_weights[j].iter_mut().zip(x) {
                    *g += dh * xi;
                }
            }
        }
    }

    grad
}

struct Adam {
    m: [f64; PARAM_COUNT],
    v: [f64; PARAM_COUNT],
    t: i32,
}

impl Adam {
    fn new() -> Self {
        Self {
            m: [0.0; PARAM_COUNT],
            v: [0.0; PARAM_COUNT],
            t: 0,
        }
    }

    fn step(&mut self, network: &mut Network, grad: &Network) {
        self.t += 1;
        let c1 = 1.0 - BETA1.powi(self.t);
        let c2 = 1.0 - BETA2.powi(self.t);

        let moments = self.m.iter_mut().zip(self.v.iter_mut());
        for ((w, g), (m, v)) in network.params_mut().zip(grad.params()).zip(moments) {
            *m = BETA1 * *m + (1.0 - BETA1) * g;
            *v = BETA2 * *v + (1.0 - BETA2) * g * g;
            *w -= LEARNING_RATE * (*m / c1) / ((*v / c2).sqrt() + ADAM_EPSILON);
        }
    }
}

/// Clamps negative weights of both layers to zero.
fn project_non_negative(network: &mut Network) {
    let weights = network
        .hidden_weights
        .iter_mut()
        .flatten()
        .chain(network.output_weights.iter_mut());
    for w in weights {
        if *w < 0.0 {
            *w = 0.0;
        }
    }
}

/// Trains the network from scratch with the fixed constants of this module.
///
/// # Errors
///
/// Returns [`PredictorError::InitializationFailure`] if the parameters or the
/// loss stop being finite.
pub fn train() -> Result<TrainingOutcome, PredictorError> {
    train_from(initial_network(SEED), EPOCHS)
}

fn train_from(mut network: Network, epochs: usize) -> Result<TrainingOutcome, PredictorError> {
    let mut adam = Adam::new();

    for _ in 0..epochs {
        let grad = gradient(&network);
        adam.step(&mut network, &grad);
        project_non_negative(&mut network);
    }

    if !network.is_finite() {
        return Err(PredictorError::InitializationFailure(
            "training diverged: non-finite parameters".to_string(),
        ));
    }

    let final_loss = loss(&network);
    if !final_loss.is_finite() {
        return Err(PredictorError::InitializationFailure(format!(
            "training diverged: loss is {final_loss}"
        )));
    }

    Ok(TrainingOutcome {
        network,
        loss: final_loss,
    })
}
