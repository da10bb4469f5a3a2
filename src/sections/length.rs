//! Length section - checks password minimum and maximum length.

use super::SectionResult;
use crate::features::FeatureVector;

const MIN_LENGTH: usize = 8;
const MAX_LENGTH: usize = 64;

pub const TOO_SHORT: &str = "Password is too short (aim for at least 12 characters)";
pub const TOO_LONG: &str = "Password is excessively long";

/// Checks the password length against the accepted range.
///
/// # Returns
/// - `[TOO_SHORT]` if shorter than 8 characters
/// - `[TOO_LONG]` if longer than 64 characters
/// - empty otherwise
pub fn length_section(_password: &str, features: &FeatureVector) -> SectionResult {
    let mut warnings = Vec::new();
    if features.length < MIN_LENGTH {
        warnings.push(TOO_SHORT);
    }
    if features.length > MAX_LENGTH {
        warnings.push(TOO_LONG);
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract;

    fn run(pwd: &str) -> SectionResult {
        length_section(pwd, &extract(pwd))
    }

    #[test]
    fn test_length_section_too_short() {
        assert_eq!(run("Short1!"), vec![TOO_SHORT]);
    }

    #[test]
    fn test_length_section_exactly_minimum() {
        assert!(run("12345678").is_empty());
    }

    #[test]
    fn test_length_section_exactly_maximum() {
        assert!(run(&"x".repeat(64)).is_empty());
    }

    #[test]
    fn test_length_section_too_long() {
        assert_eq!(run(&"x".repeat(65)), vec![TOO_LONG]);
    }

    #[test]
    fn test_length_section_counts_characters_not_bytes() {
        // 7 characters, 14 bytes
        assert_eq!(run("ééééééé"), vec![TOO_SHORT]);
    }
}
