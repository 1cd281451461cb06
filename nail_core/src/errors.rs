//! # Error Types
//!
//! Structured error types for nail_core. Each variant carries enough context
//! for a front end to show a precise rejection message, or for a script to
//! branch on [`CalcError::error_code`].
//!
//! Table lookups never error: [`thickness_for`] returns `None` for an
//! unknown combination. Errors appear only once a caller composes a full
//! calculation and the missing entry becomes a user-facing problem.
//!
//! [`thickness_for`]: crate::corrosion::SacrificialThicknessTable::thickness_for
//!
//! ## Example
//!
//! ```rust
//! use nail_core::errors::{CalcError, CalcResult};
//!
//! fn validate_diameter(diameter_mm: f64) -> CalcResult<()> {
//!     if diameter_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "diameter_mm",
//!             diameter_mm.to_string(),
//!             "Bar diameter must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_diameter(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for nail_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// The (aggressiveness, soil type, design life) triple has no table entry
    #[error("Invalid combination: {soil_type} is not listed under {aggressiveness} for a {design_life}-year design life")]
    InvalidCombination {
        aggressiveness: String,
        soil_type: String,
        design_life: u32,
    },

    /// No correlation chosen, or a required numeric field absent
    #[error("Missing selection: {field}")]
    MissingSelection { field: String },

    /// Input outside the domain of a formula (log of N <= 0, net diameter <= 0)
    #[error("Domain error for '{field}': {value} - {reason}")]
    DomainError {
        field: String,
        value: String,
        reason: String,
    },

    /// An input value is invalid (out of range, not finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A category label could not be parsed
    #[error("Unknown {kind}: '{label}'")]
    UnknownLabel { kind: String, label: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidCombination error
    pub fn invalid_combination(
        aggressiveness: impl Into<String>,
        soil_type: impl Into<String>,
        design_life: u32,
    ) -> Self {
        CalcError::InvalidCombination {
            aggressiveness: aggressiveness.into(),
            soil_type: soil_type.into(),
            design_life,
        }
    }

    /// Create a MissingSelection error
    pub fn missing_selection(field: impl Into<String>) -> Self {
        CalcError::MissingSelection {
            field: field.into(),
        }
    }

    /// Create a DomainError
    pub fn domain_error(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DomainError {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownLabel error
    pub fn unknown_label(kind: impl Into<String>, label: impl Into<String>) -> Self {
        CalcError::UnknownLabel {
            kind: kind.into(),
            label: label.into(),
        }
    }

    /// Whether the user can fix this by changing the inputs
    pub fn is_user_recoverable(&self) -> bool {
        !matches!(self, CalcError::SerializationError { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidCombination { .. } => "INVALID_COMBINATION",
            CalcError::MissingSelection { .. } => "MISSING_SELECTION",
            CalcError::DomainError { .. } => "DOMAIN_ERROR",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownLabel { .. } => "UNKNOWN_LABEL",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::domain_error("n_spt", "0", "ln(N) is undefined for N <= 0");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"DomainError\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_selection("references").error_code(), "MISSING_SELECTION");
        assert_eq!(
            CalcError::invalid_combination("Aggressive", "Compacted Fill", 5).error_code(),
            "INVALID_COMBINATION"
        );
        assert_eq!(CalcError::unknown_label("soil type", "mud").error_code(), "UNKNOWN_LABEL");
    }

    #[test]
    fn test_invalid_combination_message() {
        let error = CalcError::invalid_combination("Aggressive", "Compacted Fill (sand/silt/clay)", 25);
        assert_eq!(
            error.to_string(),
            "Invalid combination: Compacted Fill (sand/silt/clay) is not listed under Aggressive for a 25-year design life"
        );
    }

    #[test]
    fn test_recoverability() {
        assert!(CalcError::missing_selection("references").is_user_recoverable());
        let bad_json: CalcError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(!bad_json.is_user_recoverable());
    }
}
