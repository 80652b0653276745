//! # Error Types
//!
//! Every failure in this crate is a programmer-facing input problem: a
//! malformed Doodson number, a constituent built without coefficients, or a
//! configuration file that does not parse. None of them are transient, so
//! there is no retry policy anywhere; errors surface immediately through
//! [`TideError`].
//!
//! Numerical edge cases in the Schureman derivations (for example when the
//! obliquity equals the lunar inclination) are not errors. Those produce
//! non-finite values that propagate to the caller unchanged.

use std::io;
use thiserror::Error;

/// Errors that can occur while building constituents or running a prediction.
#[derive(Error, Debug)]
pub enum TideError {
    /// A constituent was built with neither a Doodson number nor coefficients.
    #[error("Doodson or coefficient must be defined for a constituent")]
    MissingCoefficients,

    /// Doodson text did not contain exactly 7 letters once whitespace was removed.
    #[error("Doodson number must have 7 letters, found {0}")]
    DoodsonLength(usize),

    /// Doodson text contained something other than `A`-`Z`.
    #[error("invalid Doodson character {0:?}")]
    DoodsonCharacter(char),

    /// A coefficient fell outside the encodable range [-5, 5].
    #[error("coefficient {value} at position {index} is outside [-5, 5]")]
    CoefficientOutOfRange { index: usize, value: i32 },

    /// An explicit coefficient vector did not have 7 entries.
    #[error("coefficient vector must have 7 entries, found {0}")]
    CoefficientCount(usize),

    /// A compound constituent was declared without members.
    #[error("compound constituent {0} has no members")]
    EmptyCompound(String),

    /// Combining a compound constituent's members overflowed `i32`.
    #[error("compound constituent {0} coefficients overflow")]
    CompoundOverflow(String),

    /// Harmonic constants referenced a constituent missing from the model.
    #[error("unknown constituent {0}")]
    UnknownConstituent(String),

    /// Timeline generation was asked for a zero or negative step.
    #[error("timeline step must be positive")]
    InvalidStep,

    /// Configuration file could not be parsed.
    #[error("config parse: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("config IO: {0}")]
    Io(#[from] io::Error),
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, TideError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_coefficients_message_is_stable() {
        assert_eq!(
            TideError::MissingCoefficients.to_string(),
            "Doodson or coefficient must be defined for a constituent"
        );
    }

    #[test]
    fn out_of_range_reports_position() {
        let err = TideError::CoefficientOutOfRange { index: 3, value: 7 };
        assert_eq!(err.to_string(), "coefficient 7 at position 3 is outside [-5, 5]");
    }
}
