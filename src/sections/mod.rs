//! Heuristic analysis sections
//!
//! Each section inspects one aspect of the password and reports zero or
//! more warnings. Sections never short-circuit each other.

mod length;
mod pattern;
mod variety;

pub use length::length_section;
pub use pattern::pattern_analysis_section;
pub use variety::character_variety_section;

use crate::features::FeatureVector;

/// Warnings produced by a single section, in rule order.
pub type SectionResult = Vec<&'static str>;

/// Signature shared by all sections.
pub type Section = fn(&str, &FeatureVector) -> SectionResult;

/// Sections in evaluation order: charset gaps, length, patterns.
pub const SECTIONS: [(&str, Section); 3] = [
    ("variety", character_variety_section),
    ("length", length_section),
    ("pattern", pattern_analysis_section),
];
