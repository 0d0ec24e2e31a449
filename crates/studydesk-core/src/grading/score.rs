//! Raw component score validation.
//!
//! Applied independently to the exam, practical (TD) and lab (TP) scores of
//! a module. Each check is pure and has no side effects.

use crate::error::ValidationError;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 20.0;

/// Outcome of validating one component score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreCheck {
    /// Present, finite and within 0..=20.
    Valid(f64),
    /// The module does not declare this component; any stored value is ignored.
    NotRequired,
    /// Required but absent, non-numeric or out of range.
    Invalid,
}

impl ScoreCheck {
    pub fn is_invalid(self) -> bool {
        matches!(self, ScoreCheck::Invalid)
    }
}

pub fn is_in_range(score: f64) -> bool {
    score.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&score)
}

pub fn validate_score(raw: Option<f64>, required: bool) -> ScoreCheck {
    if !required {
        return ScoreCheck::NotRequired;
    }
    match raw {
        Some(score) if is_in_range(score) => ScoreCheck::Valid(score),
        _ => ScoreCheck::Invalid,
    }
}

/// Parse a score typed by the user.
///
/// Blank input clears the score. Range is not checked here: `25` parses and
/// later makes the module incomplete, the same as any other invalid grade.
pub fn parse_score_input(input: &str) -> Result<Option<f64>, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let normalized = trimmed.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(ValidationError::InvalidValue {
            field: "score".into(),
            message: format!("'{trimmed}' is not a number"),
        }),
    }
}
