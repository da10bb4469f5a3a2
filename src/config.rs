//! Predictor configuration
//!
//! The only runtime knob is how the predictor obtains its parameters.
//! Thresholds, the network shape and the training set are fixed.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable selecting the [`PredictorMode`].
pub const PREDICTOR_MODE_ENV: &str = "PWD_PREDICTOR_MODE";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown predictor mode: {0:?} (expected \"frozen\" or \"train\")")]
    UnknownMode(String),
}

/// How [`crate::Predictor::initialize`] obtains the network parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PredictorMode {
    /// Load the parameters shipped with the crate.
    #[default]
    Frozen,
    /// Re-fit the network from the training set at startup.
    Train,
}

impl FromStr for PredictorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frozen" => Ok(Self::Frozen),
            "train" => Ok(Self::Train),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for PredictorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frozen => f.write_str("frozen"),
            Self::Train => f.write_str("train"),
        }
    }
}

/// Returns the predictor mode.
///
/// Priority:
/// 1. Environment variable `PWD_PREDICTOR_MODE`
/// 2. Default [`PredictorMode::Frozen`]
///
/// Unparseable values fall back to the default.
pub fn get_predictor_mode() -> PredictorMode {
    match std::env::var(PREDICTOR_MODE_ENV) {
        Ok(value) => value.parse().unwrap_or_else(|_e: ConfigError| {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}, using {}", _e, PredictorMode::default());
            PredictorMode::default()
        }),
        Err(_) => PredictorMode::default(),
    }
}

/// Environment helpers shared by every test module that touches
/// `PWD_PREDICTOR_MODE`. Callers must be `#[serial]`.
#[cfg(test)]
pub(crate) mod test_env {
    pub(crate) fn set_env(key: &str, value: &str) {
        // SAFETY: every caller is a `#[serial]` test, so no other thread
        // reads or writes the environment concurrently.
        unsafe { std::env::set_var(key, value); }
    }

    pub(crate) fn remove_env(key: &str) {
        // SAFETY: every caller is a `#[serial]` test, so no other thread
        // reads or writes the environment concurrently.
        unsafe { std::env::remove_var(key); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::test_env::{remove_env, set_env};
    use serial_test::serial;

    #[test]
    fn test_parse_modes() {
        assert_eq!("frozen".parse(), Ok(PredictorMode::Frozen));
        assert_eq!(" TRAIN ".parse(), Ok(PredictorMode::Train));
        assert_eq!(
            "fast".parse::<PredictorMode>(),
            Err(ConfigError::UnknownMode("fast".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [PredictorMode::Frozen, PredictorMode::Train] {
            assert_eq!(mode.to_string().parse(), Ok(mode));
        }
    }

    #[test]
    #[serial]
    fn test_get_predictor_mode_default() {
        remove_env(PREDICTOR_MODE_ENV);
        assert_eq!(get_predictor_mode(), PredictorMode::Frozen);
    }

    #[test]
    #[serial]
    fn test_get_predictor_mode_from_env() {
        set_env(PREDICTOR_MODE_ENV, "train");
        assert_eq!(get_predictor_mode(), PredictorMode::Train);
        remove_env(PREDICTOR_MODE_ENV);
    }

    #[test]
    #[serial]
    fn test_get_predictor_mode_unknown_falls_back() {
        set_env(PREDICTOR_MODE_ENV, "quantum");
        assert_eq!(get_predictor_mode(), PredictorMode::Frozen);
        remove_env(PREDICTOR_MODE_ENV);
    }
}
