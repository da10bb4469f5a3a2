//! Frozen network parameters.
//!
//! Generated by `training::train()` (seed `0x5E_ED0F_CAFE`, 2000 epochs,
//! Adam lr 0.01, weights kept non-negative). Regenerate with the trainer if
//! the training set changes;
//! `training::tests::test_trained_network_matches_frozen_weights` fails
//! when the two drift apart.

#![allow(clippy::excessive_precision)]

use super::network::{HIDDEN_UNITS, Network};
use crate::features::FEATURE_DIM;

const HIDDEN_WEIGHTS: [[f64; FEATURE_DIM]; HIDDEN_UNITS] = [
    [0.07679200895034773, 0.24270706690514066, 0.005865118716271352, 0.0, 0.0],
    [0.11633667940943192, 0.0038512717959093556, 0.021183106142636986, 0.0, 1.6347600102943813],
    [0.09739992365026244, 0.012545795220927641, 0.05832237555615803, 0.0, 1.4268275852146142],
    [0.09732254492942896, 0.008392716711212247, 0.008510135040655049, 0.0, 1.0707103732755043],
    [0.3156438748971065, 0.0, 0.0, 0.18935081919934774, 0.08067602160794644],
    [0.11262203918852341, 0.004686842042386599, 0.06981517060225056, 0.0, 1.040565017332976],
    [0.09008532978741304, 0.0472148719853256, 0.006017171558252107, 0.0, 0.9724048463075106],
    [0.14913451436604555, 0.0, 0.20026862334106718, 0.33813418269675444, 1.0174316450595668],
    [0.24407911626496337, 0.01487072070880773, 0.08822820783461179, 0.0, 1.8278854488520986],
    [0.2880569900184814, 0.2633093586963264, 0.09435570305508545, 7.785363562271851e-05, 0.0649935597204917],
];

const HIDDEN_BIAS: [f64; HIDDEN_UNITS] = [
    -0.28814629791157426,
    -0.46919802684371065,
    -0.42217351625853566,
    -0.47503989850914335,
    -0.25177364195845026,
    -0.5663694751399155,
    -0.5056542991504838,
    -0.2865830002028407,
    -0.9911871560676944,
    -0.2827551775133634,
];

const OUTPUT_WEIGHTS: [f64; HIDDEN_UNITS] = [
    0.0,
    0.666482206013827,
    0.38517950974709075,
    0.4404588974663745,
    0.0,
    0.33979567692895546,
    0.19408889095632573,
    0.0,
    0.09502902369336197,
    0.0,
];

const OUTPUT_BIAS: f64 = -1.386292290231627;

impl Network {
    /// The shipped, pre-trained parameters.
    pub fn frozen() -> Self {
        Self {
            hidden_weights: HIDDEN_WEIGHTS,
            hidden_bias: HIDDEN_BIAS,
            output_weights: OUTPUT_WEIGHTS,
            output_bias: OUTPUT_BIAS,
        }
    }
}
