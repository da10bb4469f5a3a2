//! Pattern analysis section - detects repetitive and sequential patterns.

use super::SectionResult;
use crate::features::FeatureVector;

pub const REPEATED: &str = "Avoid repeated characters";
pub const SEQUENTIAL: &str = "Avoid sequential characters";

/// Analyzes password for repetitive and sequential patterns.
///
/// # Returns
/// - `REPEATED` if any character other than a line terminator occurs 3+
///   times in a row
/// - `SEQUENTIAL` if a 3-character ascending run of letters or digits occurs
pub fn pattern_analysis_section(password: &str, _features: &FeatureVector) -> SectionResult {
    let chars: Vec<char> = password.chars().collect();
    let mut warnings = Vec::new();
    if chars.len() < 3 {
        return warnings;
    }

    if chars
        .windows(3)
        .any(|w| !is_line_terminator(w[0]) && w[0] == w[1] && w[1] == w[2])
    {
        warnings.push(REPEATED);
    }

    if chars.windows(3).any(is_ascending_run) {
        warnings.push(SEQUENTIAL);
    }

    warnings
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// `abc`..`xyz` (any case), `012`..`789`, and `890`.
fn is_ascending_run(window: &[char]) -> bool {
    let [a, b, c] = [window[0], window[1], window[2]].map(|ch| ch.to_ascii_lowercase());

    if a.is_ascii_lowercase() && b.is_ascii_lowercase() && c.is_ascii_lowercase() {
        return b as u32 == a as u32 + 1 && c as u32 == b as u32 + 1;
    }

    if a.is_ascii_digit() && b.is_ascii_digit() && c.is_ascii_digit() {
        return (b as u32 == a as u32 + 1 && c as u32 == b as u32 + 1) || [a, b, c] == ['8', '9', '0'];
    }

    false
}
