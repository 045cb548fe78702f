//! Randomness sources for battle resolution.
//!
//! Production uses [`RandomOrgClient`]; tests and offline runs inject
//! [`SeededDraws`] or [`FixedDraw`].

mod local;
mod random_org;

pub use local::{FixedDraw, SeededDraws};
pub use random_org::{RandomOrgClient, RandomOrgConfig, DEFAULT_RANDOM_ORG_URL, DEFAULT_TIMEOUT};

use async_trait::async_trait;

use crate::error::BattleError;

/// Supplies one uniform fraction in `[0, 1]` per call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RandomnessSource: Send + Sync {
    async fn draw(&self) -> Result<f64, BattleError>;
}

/// Parse a provider payload such as `"0.42\n"` into a checked fraction.
pub fn parse_fraction(body: &str) -> Result<f64, BattleError> {
    let text = body.trim();
    let value: f64 = text
        .parse()
        .map_err(|_| BattleError::MalformedResponse(text.to_string()))?;
    check_fraction(value)
}

/// Reject draws outside `[0, 1]`, including NaN.
pub fn check_fraction(value: f64) -> Result<f64, BattleError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(BattleError::MalformedResponse(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_text_fraction() {
        assert_eq!(parse_fraction("0.42\n").unwrap(), 0.42);
        assert_eq!(parse_fraction(" 1.00 ").unwrap(), 1.0);
        assert_eq!(parse_fraction("0").unwrap(), 0.0);
    }

    #[test]
    fn non_numeric_is_malformed() {
        assert_eq!(
            parse_fraction("<html>busy</html>"),
            Err(BattleError::MalformedResponse("<html>busy</html>".into()))
        );
        assert!(matches!(parse_fraction(""), Err(BattleError::MalformedResponse(_))));
    }

    #[test]
    fn out_of_range_is_malformed() {
        assert!(matches!(parse_fraction("1.5"), Err(BattleError::MalformedResponse(_))));
        assert!(matches!(parse_fraction("-0.01"), Err(BattleError::MalformedResponse(_))));
        assert!(matches!(parse_fraction("NaN"), Err(BattleError::MalformedResponse(_))));
    }
}
