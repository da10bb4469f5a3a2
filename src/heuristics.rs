//! Heuristic analyzer - entropy estimate and actionable warnings.

use crate::features::{FeatureVector, extract};
use crate::sections::SECTIONS;

/// Size of the printable-ASCII alphabet assumed by [`entropy_bits`].
pub const CHARSET_SIZE: f64 = 95.0;

/// Output of [`analyze`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeuristicReport {
    pub entropy_bits: f64,
    /// Warnings in rule order: charset gaps, length, repeated, sequential.
    pub warnings: Vec<String>,
}

impl HeuristicReport {
    pub fn has_warning(&self, warning: &str) -> bool {
        self.warnings.iter().any(|w| w == warning)
    }
}

/// Search-space size in bits for a password of `length` characters drawn
/// from a 95-symbol alphabet. Ignores the characters actually used.
pub fn entropy_bits(length: usize) -> f64 {
    length as f64 * CHARSET_SIZE.log2()
}

/// Runs every heuristic section over the password.
pub fn analyze(password: &str) -> HeuristicReport {
    analyze_with_features(password, &extract(password))
}

pub(crate) fn analyze_with_features(password: &str, features: &FeatureVector) -> HeuristicReport {
    let mut warnings = Vec::new();

    // Orchestrator: every section runs, in order
    for (_section_name, section_fn) in SECTIONS {
        let found = section_fn(password, features);

        #[cfg(feature = "tracing")]
        tracing::trace!("section {} reported {} warning(s)", _section_name, found.len());

        warnings.extend(found.into_iter().map(str::to_string));
    }

    HeuristicReport {
        entropy_bits: entropy_bits(features.length),
        warnings,
    }
}
