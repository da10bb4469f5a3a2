//! Password strength evaluation library
//!
//! Combines deterministic heuristic checks with a tiny learned predictor
//! and returns a score, a strength tier, adaptive feedback and itemized
//! warnings.
//!
//! # Features
//!
//! - `async` (default): Enables async predictor initialization with
//!   cancellation support and channel-based evaluation
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_PREDICTOR_MODE`: `frozen` (default) loads the shipped network
//!   parameters, `train` re-fits them at initialization
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_ml_strength::Engine;
//! use secrecy::SecretString;
//!
//! // Initialize the predictor (call once at startup)
//! let engine = Engine::new();
//! engine.initialize_predictor().expect("Failed to load predictor");
//!
//! // Evaluate a password
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let evaluation = engine.evaluate(&password);
//!
//! println!("Score: {}%", evaluation.ml_score);
//! println!("Strength: {}", evaluation.tier);
//! println!("Entropy: {}", evaluation.entropy_display());
//! for warning in &evaluation.warnings {
//!     println!("- {}", warning);
//! }
//! ```

// Internal modules
mod config;
mod evaluator;
mod features;
mod heuristics;
mod predictor;
mod sections;

// Public API
pub use config::{ConfigError, PREDICTOR_MODE_ENV, PredictorMode, get_predictor_mode};
pub use evaluator::{
    Engine, EvaluationResult, FEEDBACK_MESSAGES, StrengthTier, adaptive_feedback,
    evaluate_password, insights,
};
pub use features::{FEATURE_DIM, FeatureVector, SPECIAL_CHARS, extract};
pub use heuristics::{CHARSET_SIZE, HeuristicReport, analyze, entropy_bits};
pub use predictor::{HIDDEN_UNITS, Network, Predictor, PredictorError, PredictorState, training};

#[cfg(feature = "async")]
pub use evaluator::evaluate_tx;
