//! Error types for wagering calculations.
//!
//! Every failure is fatal to the single calculation that raised it and names
//! the offending field together with the constraint it violated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WagerError>;

/// Errors that can occur while validating inputs or computing a result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WagerError {
    /// Probability outside the open interval (0, 1).
    #[error("invalid probability for `{field}`: {value} (must be strictly between 0 and 1)")]
    InvalidProbability {
        /// Name of the offending input.
        field: String,
        /// Value supplied.
        value: f64,
    },

    /// Stake not strictly positive.
    #[error("invalid stake for `{field}`: {value} (must be greater than 0)")]
    InvalidStake {
        /// Name of the offending input.
        field: String,
        /// Value supplied.
        value: f64,
    },

    /// Odds that do not describe a payout above the stake.
    #[error("invalid odds for `{field}`: {value} ({constraint})")]
    InvalidOdds {
        /// Name of the offending input.
        field: String,
        /// Value supplied, as text so American quotes survive unparsed.
        value: String,
        /// Constraint that was violated.
        constraint: String,
    },

    /// Odds observed too long before the calculation time.
    #[error(
        "stale odds: observed {age_seconds}s ago, maximum allowed age is {max_age_seconds}s; refresh odds before calculating"
    )]
    StaleOdds {
        /// Age of the quote at calculation time.
        age_seconds: i64,
        /// Maximum age accepted.
        max_age_seconds: i64,
    },

    /// Any other parameter out of range (bankroll, bonus terms, filters).
    #[error("invalid input for `{field}`: {value} ({constraint})")]
    InvalidInput {
        /// Name of the offending input.
        field: String,
        /// Value supplied.
        value: String,
        /// Constraint that was violated.
        constraint: String,
    },
}

/// Machine-readable error category, stable across message wording changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidProbability,
    InvalidStake,
    InvalidOdds,
    StaleOdds,
    InvalidInput,
}

impl ErrorKind {
    /// Returns the display string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidProbability => "InvalidProbability",
            Self::InvalidStake => "InvalidStake",
            Self::InvalidOdds => "InvalidOdds",
            Self::StaleOdds => "StaleOdds",
            Self::InvalidInput => "InvalidInput",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl WagerError {
    /// Creates a probability error.
    pub fn invalid_probability(field: impl Into<String>, value: f64) -> Self {
        Self::InvalidProbability {
            field: field.into(),
            value,
        }
    }

    /// Creates a stake error.
    pub fn invalid_stake(field: impl Into<String>, value: f64) -> Self {
        Self::InvalidStake {
            field: field.into(),
            value,
        }
    }

    /// Creates an odds error for decimal odds that are not above 1.0.
    pub fn invalid_odds(field: impl Into<String>, value: f64) -> Self {
        Self::InvalidOdds {
            field: field.into(),
            value: value.to_string(),
            constraint: "decimal odds must be greater than 1.0".to_string(),
        }
    }

    /// Creates an odds error with a custom constraint description.
    pub fn invalid_odds_with(
        field: impl Into<String>,
        value: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidOdds {
            field: field.into(),
            value: value.into(),
            constraint: constraint.into(),
        }
    }

    /// Creates a generic out-of-range error.
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl ToString,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidProbability { .. } => ErrorKind::InvalidProbability,
            Self::InvalidStake { .. } => ErrorKind::InvalidStake,
            Self::InvalidOdds { .. } => ErrorKind::InvalidOdds,
            Self::StaleOdds { .. } => ErrorKind::StaleOdds,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
        }
    }

    /// Returns the name of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidProbability { field, .. }
            | Self::InvalidStake { field, .. }
            | Self::InvalidOdds { field, .. }
            | Self::InvalidInput { field, .. } => field,
            Self::StaleOdds { .. } => "observed_at",
        }
    }

    /// Returns a description of the constraint that was violated.
    #[must_use]
    pub fn constraint(&self) -> String {
        match self {
            Self::InvalidProbability { .. } => "0 < probability < 1 (exclusive)".to_string(),
            Self::InvalidStake { .. } => "stake > 0".to_string(),
            Self::InvalidOdds { constraint, .. } | Self::InvalidInput { constraint, .. } => {
                constraint.clone()
            }
            Self::StaleOdds {
                max_age_seconds, ..
            } => format!("odds age <= {max_age_seconds}s"),
        }
    }
}
