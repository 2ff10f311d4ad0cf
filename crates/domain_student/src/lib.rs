//! Student Directory Domain
//!
//! This crate manages the directory of registered students: bulk and manual
//! registration, roll-number lookup, administrative edits, and the paid flag.
//!
//! # Identity
//!
//! Students carry two identifiers. The generated `StudentId` keys
//! administrative operations (update, delete). The university roll number,
//! wrapped in `RollNo` and trimmed on construction, is the operational key:
//! billing resolves students by it, mark-paid mutates by it, and the
//! directory enforces its uniqueness.
//!
//! # Examples
//!
//! ```rust
//! use domain_student::student::{NewStudent, RollNo, Section, Student, Year};
//!
//! let student = Student::new(NewStudent {
//!     roll_no: RollNo::new("CS101"),
//!     name: "Asha Verma".to_string(),
//!     year: Year::Second,
//!     section: Section::A,
//! });
//!
//! assert!(!student.has_paid);
//! assert_eq!(student.year.as_str(), "2nd");
//! ```

pub mod student;
pub mod error;
pub mod validation;
pub mod ports;

pub use student::{Student, NewStudent, RollNo, Year, Section, StudentStats};
pub use error::StudentError;
pub use validation::{StudentValidator, ValidationResult};
pub use ports::{StudentDirectory, StudentDirectoryExt};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockStudentDirectory;
