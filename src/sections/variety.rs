//! Character variety section - checks for lowercase, uppercase, numbers, special chars.

use super::SectionResult;
use crate::features::FeatureVector;

pub const MISSING_LOWER: &str = "Add lowercase letters";
pub const MISSING_UPPER: &str = "Add uppercase letters";
pub const MISSING_DIGIT: &str = "Add numbers";
pub const MISSING_SPECIAL: &str = "Add special characters";

/// Reports every character class the password lacks.
///
/// # Returns
/// One warning per missing class, in the order lowercase, uppercase,
/// numbers, special characters. Empty if all classes are present.
pub fn character_variety_section(_password: &str, features: &FeatureVector) -> SectionResult {
    [
        (features.has_lower, MISSING_LOWER),
        (features.has_upper, MISSING_UPPER),
        (features.has_digit, MISSING_DIGIT),
        (features.has_special, MISSING_SPECIAL),
    ]
    .into_iter()
    .filter_map(|(present, warning)| (!present).then_some(warning))
    .collect()
}
