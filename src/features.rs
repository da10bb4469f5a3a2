//! Feature extraction - derives the model input from a raw password.

/// Punctuation symbols counted as "special" characters.
///
/// Backtick, tilde and whitespace are not members.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Number of model inputs produced by [`FeatureVector::as_input`].
pub const FEATURE_DIM: usize = 5;

/// Fixed-size description of a password used by the predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureVector {
    pub length: usize,
    pub has_lower: bool,
    pub has_upper: bool,
    pub has_digit: bool,
    pub has_special: bool,
}

impl FeatureVector {
    /// Encodes the vector as model input: `[length, lower, upper, digit, special]`,
    /// booleans as `0.0` / `1.0`.
    pub fn as_input(&self) -> [f64; FEATURE_DIM] {
        [
            self.length as f64,
            flag(self.has_lower),
            flag(self.has_upper),
            flag(self.has_digit),
            flag(self.has_special),
        ]
    }

    /// Number of character classes present (0-4).
    pub fn class_count(&self) -> usize {
        [self.has_lower, self.has_upper, self.has_digit, self.has_special]
            .iter()
            .filter(|&&b| b)
            .count()
    }
}

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// Returns `true` if `c` belongs to [`SPECIAL_CHARS`].
pub fn is_special(c: char) -> bool {
    SPECIAL_CHARS.contains(c)
}

/// Extracts the feature vector of a password.
///
/// Total over all strings; character classes are ASCII-only, so letters
/// outside `a-z` / `A-Z` count for nothing.
pub fn extract(password: &str) -> FeatureVector {
    let mut features = FeatureVector::default();
    for c in password.chars() {
        features.length += 1;
        features.has_lower |= c.is_ascii_lowercase();
        features.has_upper |= c.is_ascii_uppercase();
        features.has_digit |= c.is_ascii_digit();
        features.has_special |= is_special(c);
    }
    features
}
