//! Request and response data transfer objects
//!
//! JSON keys are camelCase to match the admin frontend's wire format.

pub mod billing;
pub mod fund;
pub mod student;

use serde::Serialize;

/// Plain message envelope used by mutation endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
