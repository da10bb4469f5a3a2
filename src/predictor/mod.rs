//! Strength predictor - a tiny learned model with an explicit readiness lifecycle.
//!
//! The predictor starts uninitialized. [`Predictor::initialize`] loads the
//! network exactly once (frozen parameters or a fresh training run, see
//! [`crate::config::PredictorMode`]); afterwards [`Predictor::predict`] is a
//! pure read of the stored parameters.

mod network;
pub mod training;
mod weights;

pub use network::{HIDDEN_UNITS, Network};

use std::sync::OnceLock;
use thiserror::Error;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::config::{PredictorMode, get_predictor_mode};
use crate::features::FeatureVector;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictorError {
    #[error("Predictor queried before initialization")]
    NotReady,
    #[error("Predictor initialization failed: {0}")]
    InitializationFailure(String),
    #[error("Predictor initialization cancelled")]
    Cancelled,
}

/// Lifecycle state of a [`Predictor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictorState {
    Uninitialized,
    Ready,
    /// Initialization failed; the predictor stays unavailable for its lifetime.
    Failed,
}

/// Owned strength predictor.
///
/// The outcome of the first initialization is stored for good: later calls
/// to [`Predictor::initialize`] return it without retraining, and concurrent
/// callers wait for the first one to finish.
#[derive(Debug, Default)]
pub struct Predictor {
    state: OnceLock<Result<Network, PredictorError>>,
    #[cfg(feature = "async")]
    init_lock: tokio::sync::Mutex<()>,
}

impl Predictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializes the predictor using the mode from `PWD_PREDICTOR_MODE`.
    ///
    /// # Errors
    ///
    /// Returns [`PredictorError::InitializationFailure`] if the parameters
    /// are unusable. The failure is permanent for this predictor.
    pub fn initialize(&self) -> Result<(), PredictorError> {
        self.initialize_with(|| load_network(get_predictor_mode()))
    }

    /// Initializes the predictor with an explicit mode, ignoring the environment.
    pub fn initialize_mode(&self, mode: PredictorMode) -> Result<(), PredictorError> {
        self.initialize_with(|| load_network(mode))
    }

    /// Future-returning form of [`Predictor::initialize`].
    ///
    /// A token already cancelled before the call returns
    /// [`PredictorError::Cancelled`] and leaves the predictor uninitialized.
    /// Once loading has started it runs to completion.
    #[cfg(feature = "async")]
    pub async fn initialize_async(
        &self,
        token: Option<CancellationToken>,
    ) -> Result<(), PredictorError> {
        self.initialize_mode_async(get_predictor_mode(), token).await
    }

    /// Future-returning form of [`Predictor::initialize_mode`].
    ///
    /// Training runs on the blocking pool; async callers are serialized so
    /// only the first one loads.
    #[cfg(feature = "async")]
    pub async fn initialize_mode_async(
        &self,
        mode: PredictorMode,
        token: Option<CancellationToken>,
    ) -> Result<(), PredictorError> {
        if token.as_ref().is_some_and(|t| t.is_cancelled()) {
            #[cfg(feature = "tracing")]
            tracing::info!("Predictor initialization cancelled before start");
            return Err(PredictorError::Cancelled);
        }

        let _guard = self.init_lock.lock().await;
        if let Some(outcome) = self.state.get() {
            return stored(outcome);
        }

        let loaded = match mode {
            PredictorMode::Frozen => load_network(mode),
            PredictorMode::Train => tokio::task::spawn_blocking(move || load_network(mode))
                .await
                .unwrap_or_else(|e| {
                    Err(PredictorError::InitializationFailure(format!(
                        "training task failed: {e}"
                    )))
                }),
        };

        self.initialize_with(|| loaded)
    }

    pub(crate) fn initialize_with<F>(&self, load: F) -> Result<(), PredictorError>
    where
        F: FnOnce() -> Result<Network, PredictorError>,
    {
        stored(self.state.get_or_init(load))
    }

    pub fn state(&self) -> PredictorState {
        match self.state.get() {
            None => PredictorState::Uninitialized,
            Some(Ok(_)) => PredictorState::Ready,
            Some(Err(_)) => PredictorState::Failed,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == PredictorState::Ready
    }

    /// Predicted strength in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// - [`PredictorError::NotReady`] before initialization
    /// - the stored failure if initialization failed
    pub fn predict(&self, features: &FeatureVector) -> Result<f64, PredictorError> {
        match self.state.get() {
            None => Err(PredictorError::NotReady),
            Some(Err(e)) => Err(e.clone()),
            Some(Ok(network)) => Ok(network.forward(&features.as_input())),
        }
    }
}

fn stored(outcome: &Result<Network, PredictorError>) -> Result<(), PredictorError> {
    outcome.as_ref().map(|_| ()).map_err(Clone::clone)
}

fn load_network(mode: PredictorMode) -> Result<Network, PredictorError> {
    #[cfg(feature = "tracing")]
    tracing::info!("Predictor initialization started (mode: {})", mode);

    let result = match mode {
        PredictorMode::Frozen => {
            let network = Network::frozen();
            if network.is_finite() {
                Ok(network)
            } else {
                Err(PredictorError::InitializationFailure(
                    "frozen parameters are not finite".to_string(),
                ))
            }
        }
        PredictorMode::Train => training::train().map(|outcome| {
            #[cfg(feature = "tracing")]
            tracing::info!("Predictor trained: final loss {:.6}", outcome.loss);
            outcome.network
        }),
    };

    match &result {
        Ok(_) => {
            #[cfg(feature = "tracing")]
            tracing::info!("Predictor ready");
        }
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Predictor initialization FAILED: {}", _e);
        }
    }

    result
}


#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;
    use crate::features::extract;
    use crate::config::test_env::{remove_env, set_env};
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_initialize_async() {
        remove_env(crate::config::PREDICTOR_MODE_ENV);
        let predictor = Predictor::new();
        assert_eq!(predictor.initialize_async(None).await, Ok(()));
        assert!(predictor.is_ready());
        assert!(predictor.predict(&extract("Tr0ub4dor&3")).is_ok());
    }

    #[tokio::test]
    async fn test_initialize_async_cancelled_before_start() {
        let predictor = Predictor::new();
        let token = CancellationToken::new();
        token.cancel();

        assert_eq!(
            predictor.initialize_async(Some(token)).await,
            Err(PredictorError::Cancelled)
        );
        assert_eq!(predictor.state(), PredictorState::Uninitialized);

        // A later attempt still works
        predictor.initialize_mode(PredictorMode::Frozen).unwrap();
        assert!(predictor.is_ready());
    }

    #[tokio::test]
    #[serial]
    async fn test_initialize_async_with_live_token() {
        remove_env(crate::config::PREDICTOR_MODE_ENV);
        let predictor = Predictor::new();
        let token = CancellationToken::new();
        assert_eq!(predictor.initialize_async(Some(token)).await, Ok(()));
        assert!(predictor.is_ready());
    }

    #[tokio::test]
    #[serial]
    async fn test_initialize_async_train_mode_from_env() {
        set_env(crate::config::PREDICTOR_MODE_ENV, "train");
        let predictor = Predictor::new();
        let result = predictor.initialize_async(None).await;
        remove_env(crate::config::PREDICTOR_MODE_ENV);

        assert_eq!(result, Ok(()));
        let frozen = Network::frozen();
        for (x, _) in training::TRAINING_SET.iter() {
            let features = FeatureVector {
                length: x[0] as usize,
                has_lower: x[1] == 1.0,
                has_upper: x[2] == 1.0,
                has_digit: x[3] == 1.0,
                has_special: x[4] == 1.0,
            };
            let diff = (predictor.predict(&features).unwrap() - frozen.forward(x)).abs();
            assert!(diff < 1e-6, "input {x:?}: differs by {diff}");
        }
    }

    #[tokio::test]
    async fn test_overlapping_async_initialization() {
        let predictor = Predictor::new();
        let (a, b) = tokio::join!(
            predictor.initialize_mode_async(PredictorMode::Train, None),
            predictor.initialize_mode_async(PredictorMode::Train, None),
        );
        assert_eq!(a, Ok(()));
        assert_eq!(b, Ok(()));
        assert!(predictor.is_ready());
    }

    #[tokio::test]
    async fn test_initialize_mode_async_after_sync_keeps_first_outcome() {
        let predictor = Predictor::new();
        let failure = PredictorError::InitializationFailure("diverged".to_string());
        let _ = predictor.initialize_with(|| Err(failure.clone()));

        assert_eq!(
            predictor.initialize_mode_async(PredictorMode::Frozen, None).await,
            Err(failure)
        );
        assert_eq!(predictor.state(), PredictorState::Failed);
    }
}
