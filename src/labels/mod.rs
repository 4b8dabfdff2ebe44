//! Syllable label rules and normalization.

mod normalize;
mod rules;

pub use normalize::normalize_segments;
pub use rules::LabelRules;
