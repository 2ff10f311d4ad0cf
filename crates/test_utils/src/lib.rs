//! Shared test support for the back office suites
//!
//! Fixtures carry the well-known students and fee amounts the tests reason
//! about, builders assemble entities with sensible defaults, and the
//! database module hands out migrated in-memory pools. Everything re-exports
//! from the crate root so a test can `use test_utils::*;` and start writing
//! assertions.

pub mod assertions;
pub mod builders;
pub mod database;
pub mod fixtures;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use database::*;
pub use fixtures::*;
pub use generators::*;
