//! Submission Validation
//!
//! Checks the raw form inputs before anything touches the store: both signs
//! must be members of the fixed enumeration and the duration must be an
//! integer in [1, 36525] days (roughly a century).

use crate::signs::Sign;
use thiserror::Error;

pub const DURATION_MIN: i64 = 1;
pub const DURATION_MAX: i64 = 36525;

/// Validation failures, worded for direct display as flash messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid signs.")]
    InvalidSigns,
    #[error("Duration must be an integer.")]
    DurationNotInteger,
    #[error("Duration must be between 1 and 36525 days.")]
    DurationOutOfRange,
}

/// Validates a raw submission. Signs are checked first, so a bad sign wins
/// over a bad duration. Returns the parsed signs in submission order; the
/// caller canonicalizes before persisting.
pub fn validate(
    signo1: &str,
    signo2: &str,
    duracao: &str,
) -> Result<(Sign, Sign, i64), ValidationError> {
    let (Some(sign_a), Some(sign_b)) = (Sign::from_name(signo1), Sign::from_name(signo2)) else {
        return Err(ValidationError::InvalidSigns);
    };

    let duration: i64 = duracao
        .parse()
        .map_err(|_| ValidationError::DurationNotInteger)?;

    if !(DURATION_MIN..=DURATION_MAX).contains(&duration) {
        return Err(ValidationError::DurationOutOfRange);
    }

    Ok((sign_a, sign_b, duration))
}
