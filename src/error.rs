//! # Mapper Error Handling
//!
//! This module provides error handling for the register mapping engine.
//!
//! The engine deliberately keeps its error surface small: out-of-range
//! numeric values are never errors (they are clamped and logged, see
//! [`crate::scaling`]), and a missing symbolic configuration key only causes
//! the corresponding mapping to be omitted with a warning. The only hard
//! failures are structural-input problems (for example a component with an
//! empty identifier) and configuration documents that cannot be parsed.
//!
//! ## Error Categories
//!
//! ### Structural Input Errors
//! - A component or frameset whose fields cannot produce a register block
//!   (empty component id)
//!
//! ### Configuration Errors
//! - Malformed mapping configuration documents
//! - Configuration values that cannot be represented on the wire

use thiserror::Error;

/// Result type alias for mapping operations
///
/// This is a convenience type alias that uses `MapperError` as the error
/// type for all encoder operations, providing consistent error handling
/// throughout the codebase.
pub type MapperResult<T> = Result<T, MapperError>;

/// Error types produced by the mapping engine
///
/// Each variant carries enough context to diagnose the failing input. Note
/// that clamped values and missing configuration keys are *not* represented
/// here; those are advisory diagnostics emitted through the `log` facade,
/// and the encoders still return a (possibly shorter) mapping list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapperError {
    /// Structurally invalid input
    ///
    /// The supplied instruction, component, or frameset is malformed in a
    /// way the upstream source should have prevented. This is a programming
    /// error on the caller's side and fails fast rather than being skipped.
    ///
    /// # Examples
    /// - Component with an empty id (no first character to encode)
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Configuration errors
    ///
    /// The mapping configuration document is malformed or contains values
    /// that cannot be used to address a 16-bit register space.
    ///
    /// # Examples
    /// - Mapping configuration JSON that fails to deserialize
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl MapperError {
    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput { message: message.into() }
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Check if the error is a structural input problem
    ///
    /// Structural input errors indicate a bug in the calling layer (the
    /// instruction or component source), not a recoverable data condition.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

/// Convert from serde JSON errors
///
/// Automatically converts configuration deserialization failures to
/// `MapperError::Configuration`, preserving the original error message.
impl From<serde_json::Error> for MapperError {
    fn from(err: serde_json::Error) -> Self {
        Self::configuration(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = MapperError::invalid_input("component id is empty");
        assert!(err.is_input_error());

        let err = MapperError::configuration("missing axes table");
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_error_display() {
        let err = MapperError::invalid_input("component id is empty");
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid input"));
        assert!(msg.contains("component id is empty"));
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: MapperError = parse_err.into();
        assert!(matches!(err, MapperError::Configuration { .. }));
    }
}
