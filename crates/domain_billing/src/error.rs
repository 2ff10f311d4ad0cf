//! Billing domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the billing domain
///
/// Each step of the billing sequence has its own failure kind so callers can
/// tell how far a request got. A notification failure is never returned from
/// `bill_student`; it is carried in the outcome as a warning instead.
#[derive(Debug, Error)]
pub enum BillingError {
    /// No student is registered under the requested roll number
    #[error("Student not found: {roll_no}")]
    StudentNotFound { roll_no: String },

    /// Receipt rendering failed; the record is persisted without an artifact
    #[error("Receipt rendering failed: {0}")]
    RenderFailure(#[source] PortError),

    /// Uploading the rendered artifact to the blob store failed
    #[error("Artifact upload failed: {0}")]
    UploadFailure(#[source] PortError),

    /// A database-side operation failed (lookup, insert, or artifact attach)
    #[error("Billing storage failed: {0}")]
    StorageFailure(#[source] PortError),

    /// Sending the receipt notification failed
    #[error("Receipt notification failed: {0}")]
    NotifyFailure(#[source] PortError),

    /// Input could not be interpreted as billing data
    #[error("Invalid billing data: {0}")]
    InvalidData(String),
}

impl BillingError {
    /// Creates a StudentNotFound error
    pub fn student_not_found(roll_no: impl Into<String>) -> Self {
        BillingError::StudentNotFound {
            roll_no: roll_no.into(),
        }
    }

    /// Creates an InvalidData error
    pub fn invalid(message: impl Into<String>) -> Self {
        BillingError::InvalidData(message.into())
    }

    /// Returns true if the error means the student does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, BillingError::StudentNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_not_found_display() {
        let error = BillingError::student_not_found("CS101");
        assert_eq!(error.to_string(), "Student not found: CS101");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_render_failure_carries_source() {
        let error = BillingError::RenderFailure(PortError::internal("pdf writer closed"));
        assert!(error.to_string().contains("Receipt rendering failed"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_storage_failure_is_not_not_found() {
        let error = BillingError::StorageFailure(PortError::connection("pool exhausted"));
        assert!(!error.is_not_found());
    }
}
