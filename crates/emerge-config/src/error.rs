//! Error types for strict configuration validation.

use thiserror::Error;

use crate::config::{DELAY_RANGE_MS, DURATION_RANGE_MS};
use crate::easing::EasingParseError;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// A constraint violated by a raw spec under strict validation.
///
/// Strict validation is the authoring-time counterpart of lenient
/// normalization: instead of correcting a field it reports the first
/// violation encountered, in declaration order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown animation family `{0}`")]
    InvalidFamily(String),

    #[error("family `{family}` used with incompatible direction {direction:?}")]
    InvalidDirectionContext {
        family: String,
        direction: Option<String>,
    },

    #[error("duration {0}ms is outside {}..={}ms", DURATION_RANGE_MS.start(), DURATION_RANGE_MS.end())]
    DurationOutOfRange(i64),

    #[error("delay {0}ms is outside {}..={}ms", DELAY_RANGE_MS.start(), DELAY_RANGE_MS.end())]
    DelayOutOfRange(i64),

    #[error("malformed easing expression `{0}`")]
    MalformedEasing(String, #[source] EasingParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_the_offending_value() {
        let err = ConfigError::InvalidFamily("wobble".to_string());
        assert_eq!(err.to_string(), "unknown animation family `wobble`");

        let err = ConfigError::DurationOutOfRange(9000);
        assert_eq!(err.to_string(), "duration 9000ms is outside 100..=3000ms");

        let err = ConfigError::MalformedEasing(
            "steps(".to_string(),
            EasingParseError::MissingClosingParen("steps(".to_string()),
        );
        assert_eq!(err.to_string(), "malformed easing expression `steps(`");
    }
}
