//! Password strength evaluator - aggregates heuristics and the predictor.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::config::PredictorMode;
use crate::features::{FeatureVector, extract};
use crate::heuristics::analyze_with_features;
use crate::predictor::{Predictor, PredictorError, PredictorState};

const FEEDBACK_VERY_WEAK: &str = "Your password is very weak. Try adding more variety and length.";
const FEEDBACK_WEAK: &str =
    "Your password could be stronger. Consider using a mix of character types.";
const FEEDBACK_GOOD: &str =
    "Good password! For even better security, try increasing its complexity.";
const FEEDBACK_EXCELLENT: &str = "Excellent password! It would be very difficult to crack.";

/// The four adaptive feedback messages, weakest first.
pub const FEEDBACK_MESSAGES: [&str; 4] = [
    FEEDBACK_VERY_WEAK,
    FEEDBACK_WEAK,
    FEEDBACK_GOOD,
    FEEDBACK_EXCELLENT,
];

/// Strength category derived from the predictor score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum StrengthTier {
    #[default]
    VeryWeak = 0,
    Weak = 1,
    Moderate = 2,
    Strong = 3,
    VeryStrong = 4,
}

impl StrengthTier {
    /// `min(floor(score / 25), 4)`.
    pub fn from_score(ml_score: u8) -> Self {
        match ml_score / 25 {
            0 => Self::VeryWeak,
            1 => Self::Weak,
            2 => Self::Moderate,
            3 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryWeak => "Very Weak",
            Self::Weak => "Weak",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete assessment of one password.
///
/// `ml_score`, `feedback` and `insights` are only filled in when the
/// predictor is ready; otherwise they stay `0`, `""` and `[]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluationResult {
    /// Predictor output as a percentage, 0-100.
    pub ml_score: u8,
    pub tier: StrengthTier,
    pub feedback: String,
    /// One line per feature, e.g. `"Digits: Missing"`.
    pub insights: Vec<String>,
    pub entropy_bits: f64,
    pub warnings: Vec<String>,
}

impl EvaluationResult {
    /// The zero state returned for an empty password.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    pub fn strength_label(&self) -> &'static str {
        self.tier.label()
    }

    /// Entropy with two decimals, e.g. `"72.27 bits"`.
    pub fn entropy_display(&self) -> String {
        format!("{:.2} bits", self.entropy_bits)
    }
}

/// Adaptive feedback for a score: `[0,30)`, `[30,60)`, `[60,80)`, `[80,100]`.
pub fn adaptive_feedback(ml_score: u8) -> &'static str {
    match ml_score {
        0..30 => FEEDBACK_VERY_WEAK,
        30..60 => FEEDBACK_WEAK,
        60..80 => FEEDBACK_GOOD,
        _ => FEEDBACK_EXCELLENT,
    }
}

/// Per-feature explanation lines, in the model's input order.
pub fn insights(features: &FeatureVector) -> Vec<String> {
    let length_verdict = match features.length {
        0..8 => "Too short",
        8..12 => "Acceptable",
        _ => "Good",
    };
    let presence = |present: bool| if present { "Present" } else { "Missing" };

    vec![
        format!("Length ({}): {}", features.length, length_verdict),
        format!("Lowercase: {}", presence(features.has_lower)),
        format!("Uppercase: {}", presence(features.has_upper)),
        format!("Digits: {}", presence(features.has_digit)),
        format!("Special chars: {}", presence(features.has_special)),
    ]
}

/// Evaluates password strength and returns a detailed evaluation.
///
/// Never fails: an uninitialized or failed predictor yields a heuristic-only
/// result with `ml_score == 0`.
///
/// # Arguments
/// * `password` - The password to evaluate
/// * `predictor` - The strength predictor; used only if ready
pub fn evaluate_password(password: &SecretString, predictor: &Predictor) -> EvaluationResult {
    let pwd = password.expose_secret();
    if pwd.is_empty() {
        return EvaluationResult::empty();
    }

    let features = extract(pwd);
    let report = analyze_with_features(pwd, &features);

    let mut result = EvaluationResult {
        entropy_bits: report.entropy_bits,
        warnings: report.warnings,
        ..EvaluationResult::default()
    };

    if !predictor.is_ready() {
        #[cfg(feature = "tracing")]
        tracing::debug!("Predictor not ready ({:?}), heuristic-only evaluation", predictor.state());
        return result;
    }

    match predictor.predict(&features) {
        Ok(prediction) => {
            let ml_score = (prediction * 100.0).round().clamp(0.0, 100.0) as u8;
            result.ml_score = ml_score;
            result.tier = StrengthTier::from_score(ml_score);
            result.feedback = adaptive_feedback(ml_score).to_string();
            result.insights = insights(&features);
        }
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Prediction failed on a ready predictor: {}", _e);
        }
    }

    result
}

/// Owns a [`Predictor`] and exposes the two consumer-facing operations.
///
/// `Engine` is `Send + Sync`; share it behind an `Arc` to evaluate from
/// several tasks once initialized.
#[derive(Debug, Default)]
pub struct Engine {
    predictor: Predictor,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the predictor. Call once at startup.
    ///
    /// # Errors
    ///
    /// See [`Predictor::initialize`]. After a failure the engine keeps
    /// producing heuristic-only results.
    pub fn initialize_predictor(&self) -> Result<(), PredictorError> {
        self.predictor.initialize()
    }

    /// Loads the predictor with an explicit [`PredictorMode`].
    pub fn initialize_predictor_mode(&self, mode: PredictorMode) -> Result<(), PredictorError> {
        self.predictor.initialize_mode(mode)
    }

    /// Future-returning form of [`Engine::initialize_predictor`].
    #[cfg(feature = "async")]
    pub async fn initialize_predictor_async(
        &self,
        token: Option<CancellationToken>,
    ) -> Result<(), PredictorError> {
        self.predictor.initialize_async(token).await
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    pub fn predictor_state(&self) -> PredictorState {
        self.predictor.state()
    }

    pub fn is_ready(&self) -> bool {
        self.predictor.is_ready()
    }

    /// Evaluates a password. Safe to call before the predictor is ready.
    pub fn evaluate(&self, password: &SecretString) -> EvaluationResult {
        evaluate_password(password, &self.predictor)
    }
}

/// Async version that sends evaluation result via channel.
#[cfg(feature = "async")]
pub async fn evaluate_tx(
    engine: &Engine,
    password: &SecretString,
    tx: mpsc::Sender<EvaluationResult>,
) {
    let evaluation = engine.evaluate(password);

    if let Err(_e) = tx.send(evaluation).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password evaluation result: {}", _e);
    }
}


#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;
    use crate::config::test_env::remove_env;
    use serial_test::serial;

    fn secret(pwd: &str) -> SecretString {
        SecretString::new(pwd.to_string().into())
    }

    #[tokio::test]
    #[serial]
    async fn test_initialize_predictor_async_then_evaluate() {
        remove_env(crate::config::PREDICTOR_MODE_ENV);
        let engine = Engine::new();
        assert!(!engine.is_ready());

        engine
            .initialize_predictor_async(None)
            .await
            .expect("initialization should succeed");
        assert!(engine.is_ready());

        let evaluation = engine.evaluate(&secret("Tr0ub4dor&3"));
        assert!(FEEDBACK_MESSAGES.contains(&evaluation.feedback.as_str()));
    }

    #[tokio::test]
    async fn test_initialize_predictor_async_cancelled() {
        let engine = Engine::new();
        let token = CancellationToken::new();
        token.cancel();

        let result = engine.initialize_predictor_async(Some(token)).await;
        assert_eq!(result, Err(PredictorError::Cancelled));
        assert_eq!(engine.predictor_state(), PredictorState::Uninitialized);
    }

    #[tokio::test]
    async fn test_evaluate_tx() {
        let engine = Engine::new();
        engine.initialize_predictor_mode(PredictorMode::Frozen).unwrap();
        let (tx, mut rx) = mpsc::channel(1);

        evaluate_tx(&engine, &secret("TestPass123!"), tx).await;

        let evaluation = rx.recv().await.expect("Should receive evaluation");
        assert!(!evaluation.insights.is_empty());
        assert_eq!(evaluation, engine.evaluate(&secret("TestPass123!")));
    }

    #[tokio::test]
    async fn test_evaluate_tx_closed_receiver() {
        let engine = Engine::new();
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        // Must not panic
        evaluate_tx(&engine, &secret("TestPass123!"), tx).await;
    }
}
