//! # Error Types
//!
//! Structured error types for riser_core. The calculators themselves are
//! total functions and never fail; errors only come from the boundary:
//! structural validation of a building snapshot and file I/O.
//!
//! ## Example
//!
//! ```rust
//! use riser_core::errors::{CalcError, CalcResult};
//!
//! fn validate_floors(floors: u32) -> CalcResult<()> {
//!     if floors == 0 {
//!         return Err(CalcError::invalid_input(
//!             "sections[0].floors",
//!             floors.to_string(),
//!             "Section must have at least one floor",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for riser_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for validation and I/O.
///
/// Each variant carries enough context to point the editor at the
/// offending field or file.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is structurally invalid (out of range, duplicate id, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

/// Non-fatal findings reported alongside a successful calculation.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum CalcWarning {
    /// A floor has apartments or rent units but no section has a zone over it
    #[error("floor {floor} has apartments/rent but no zone covers it")]
    UncoveredFloor { floor: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("sections[0].floors", "0", "Section must have at least one floor");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("sections").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::serialization("bad json").error_code(), "SERIALIZATION_ERROR");
        assert_eq!(
            CalcError::file_error("open", "a.json", "not found").error_code(),
            "FILE_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        let error = CalcError::invalid_input("settings.h1", "-3", "Floor height cannot be negative");
        assert_eq!(
            error.to_string(),
            "Invalid input for 'settings.h1': -3 - Floor height cannot be negative"
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = CalcWarning::UncoveredFloor { floor: 12 };
        assert_eq!(warning.to_string(), "floor 12 has apartments/rent but no zone covers it");
        let json = serde_json::to_string(&warning).unwrap();
        assert_eq!(json, r#"{"type":"UncoveredFloor","details":{"floor":12}}"#);
    }
}
