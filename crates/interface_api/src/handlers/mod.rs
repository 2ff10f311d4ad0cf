//! Request handlers for each domain

pub mod billing;
pub mod fund;
pub mod health;
pub mod student;
