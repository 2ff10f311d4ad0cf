//! Student validation rules
//!
//! This module provides validation for student registration input,
//! ensuring data integrity before a record enters the directory.
//!
//! # Validation Rules
//!
//! - Roll number must not be empty after trimming
//! - Name must not be empty after trimming
//! - Year and section are typed enums and therefore valid by construction;
//!   parsing of their wire spellings is handled at the boundary

use crate::error::StudentError;
use crate::student::NewStudent;

/// Result of student validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the input is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a failed validation result with errors
    pub fn fail(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Adds a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Converts the result into an error if invalid
    pub fn into_result(self) -> Result<(), StudentError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(StudentError::validation_failed(self.errors))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for student registration input
///
/// # Examples
///
/// ```rust
/// use domain_student::validation::StudentValidator;
/// use domain_student::student::{NewStudent, RollNo, Section, Year};
///
/// let input = NewStudent {
///     roll_no: RollNo::new("CS101"),
///     name: "Asha Verma".to_string(),
///     year: Year::Second,
///     section: Section::A,
/// };
///
/// let result = StudentValidator::validate(&input);
/// assert!(result.is_valid);
/// ```
pub struct StudentValidator;

impl StudentValidator {
    /// Validates registration input
    ///
    /// # Arguments
    ///
    /// * `input` - The registration data to validate
    ///
    /// # Returns
    ///
    /// A `ValidationResult` containing any errors or warnings
    pub fn validate(input: &NewStudent) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if input.roll_no.is_empty() {
            result.add_error("Roll number is required");
        }

        if input.name.trim().is_empty() {
            result.add_error("Name is required");
        }

        // Inner whitespace in a roll number usually means a spreadsheet
        // copy-paste artifact; accept it but flag it.
        if input.roll_no.as_str().chars().any(char::is_whitespace) {
            result.add_warning(format!(
                "Roll number '{}' contains whitespace",
                input.roll_no
            ));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::{RollNo, Section, Year};

    fn valid_input() -> NewStudent {
        NewStudent {
            roll_no: RollNo::new("CS101"),
            name: "Asha Verma".to_string(),
            year: Year::Second,
            section: Section::A,
        }
    }

    #[test]
    fn test_valid_input_passes() {
        let result = StudentValidator::validate(&valid_input());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_empty_roll_fails() {
        let mut input = valid_input();
        input.roll_no = RollNo::new("   ");
        let result = StudentValidator::validate(&input);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("Roll number")));
    }

    #[test]
    fn test_empty_name_fails() {
        let mut input = valid_input();
        input.name = "  ".to_string();
        let result = StudentValidator::validate(&input);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("Name")));
    }

    #[test]
    fn test_inner_whitespace_warns_but_passes() {
        let mut input = valid_input();
        input.roll_no = RollNo::new("CS 101");
        let result = StudentValidator::validate(&input);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_into_result_maps_failure() {
        let mut input = valid_input();
        input.name = String::new();
        let result = StudentValidator::validate(&input).into_result();
        assert!(matches!(result, Err(StudentError::ValidationFailed(_))));
    }
}
