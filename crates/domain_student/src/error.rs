//! Student domain errors
//!
//! This module defines all error types that can occur in the student domain,
//! including validation errors, not found errors, and duplicate registrations.

use thiserror::Error;

/// Errors that can occur in the student domain
#[derive(Debug, Error)]
pub enum StudentError {
    /// Student with the given roll number or ID was not found
    #[error("Student not found: {0}")]
    StudentNotFound(String),

    /// Attempted to register a roll number that already exists
    #[error("Student already exists: {0}")]
    DuplicateStudent(String),

    /// Invalid student data provided
    #[error("Invalid student data: {0}")]
    InvalidData(String),

    /// Student validation failed
    #[error("Student validation failed: {0}")]
    ValidationFailed(String),
}

impl StudentError {
    /// Creates a StudentNotFound error from any identifier type
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        StudentError::StudentNotFound(id.to_string())
    }

    /// Creates a DuplicateStudent error from a roll number
    pub fn duplicate(roll: impl std::fmt::Display) -> Self {
        StudentError::DuplicateStudent(roll.to_string())
    }

    /// Creates an InvalidData error with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        StudentError::InvalidData(message.into())
    }

    /// Creates a ValidationFailed error from validation errors
    pub fn validation_failed(errors: Vec<String>) -> Self {
        StudentError::ValidationFailed(errors.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_includes_identifier() {
        let error = StudentError::not_found("CS101");
        assert!(error.to_string().contains("CS101"));
    }

    #[test]
    fn test_validation_failed_joins_errors() {
        let error = StudentError::validation_failed(vec![
            "Name is required".to_string(),
            "Roll number is required".to_string(),
        ]);
        let display = error.to_string();
        assert!(display.contains("Name is required"));
        assert!(display.contains("Roll number is required"));
    }
}
