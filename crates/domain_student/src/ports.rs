//! Student Domain Ports
//!
//! This module defines the port interface for the student directory, enabling
//! swappable implementations (internal database, mock, etc.).
//!
//! # Architecture
//!
//! The `StudentDirectory` trait defines all operations that the student domain
//! needs from its data source. Multiple adapters can implement this trait:
//!
//! - **Internal Adapter**: Uses the SQLite database (infra_db)
//! - **Mock Adapter**: For testing without a database
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_student::ports::{StudentDirectory, StudentDirectoryExt};
//! use std::sync::Arc;
//!
//! // Application services receive the port trait
//! pub struct BillingService {
//!     students: Arc<dyn StudentDirectory>,
//! }
//!
//! impl BillingService {
//!     pub async fn resolve(&self, roll: &RollNo) -> Result<Student, PortError> {
//!         self.students.require_by_roll(roll).await
//!     }
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError, StudentId};

use crate::student::{NewStudent, RollNo, Student, StudentStats};

/// The main port trait for student directory operations
///
/// This trait defines all operations that the student domain requires from its
/// underlying data source.
///
/// All methods are async and return `Result<T, PortError>` for consistent
/// error handling across adapter implementations.
#[async_trait]
pub trait StudentDirectory: DomainPort + HealthCheckable {
    // ========================================================================
    // Lookup Operations
    // ========================================================================

    /// Finds a student by roll number
    ///
    /// # Arguments
    ///
    /// * `roll` - The trimmed roll number to match exactly
    ///
    /// # Returns
    ///
    /// The student if one holds this roll number, `None` otherwise
    async fn find_by_roll(&self, roll: &RollNo) -> Result<Option<Student>, PortError>;

    /// Finds a student by identifier
    ///
    /// # Arguments
    ///
    /// * `id` - The student identifier
    ///
    /// # Returns
    ///
    /// The student if found, `None` otherwise
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, PortError>;

    // ========================================================================
    // Registration Operations
    // ========================================================================

    /// Registers a single student
    ///
    /// # Arguments
    ///
    /// * `input` - The registration data
    ///
    /// # Returns
    ///
    /// The created student, or `PortError::Conflict` if the roll number
    /// already exists
    async fn insert(&self, input: NewStudent) -> Result<Student, PortError>;

    /// Registers a batch of already-parsed rows
    ///
    /// Rows whose roll number already exists in the directory are skipped.
    ///
    /// # Arguments
    ///
    /// * `inputs` - The registration rows
    ///
    /// # Returns
    ///
    /// The number of rows actually inserted
    async fn insert_many(&self, inputs: Vec<NewStudent>) -> Result<usize, PortError>;

    // ========================================================================
    // Administrative Operations
    // ========================================================================

    /// Replaces a student record, keyed by its identifier
    ///
    /// # Arguments
    ///
    /// * `student` - The full record to store
    ///
    /// # Returns
    ///
    /// The stored student, or `PortError::NotFound` if the identifier is
    /// unknown
    async fn update(&self, student: &Student) -> Result<Student, PortError>;

    /// Deletes a student record
    ///
    /// # Arguments
    ///
    /// * `id` - The student identifier
    ///
    /// # Returns
    ///
    /// `PortError::NotFound` if the identifier is unknown
    async fn delete(&self, id: StudentId) -> Result<(), PortError>;

    /// Sets the paid flag on the student holding a roll number
    ///
    /// Last-writer-wins; there is no ordering guarantee relative to
    /// concurrent billing.
    ///
    /// # Arguments
    ///
    /// * `roll` - The trimmed roll number
    ///
    /// # Returns
    ///
    /// The updated student, or `PortError::NotFound`
    async fn mark_paid(&self, roll: &RollNo) -> Result<Student, PortError>;

    // ========================================================================
    // Reporting Operations
    // ========================================================================

    /// Returns paid/unpaid counts over the whole directory
    async fn stats(&self) -> Result<StudentStats, PortError>;
}

/// Extension trait for StudentDirectory with convenience methods
#[async_trait]
pub trait StudentDirectoryExt: StudentDirectory {
    /// Finds a student by roll number or returns NotFound
    async fn require_by_roll(&self, roll: &RollNo) -> Result<Student, PortError> {
        self.find_by_roll(roll)
            .await?
            .ok_or_else(|| PortError::not_found("Student", roll))
    }

    /// Finds a student by identifier or returns NotFound
    async fn require_by_id(&self, id: StudentId) -> Result<Student, PortError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| PortError::not_found("Student", id))
    }

    /// Returns whether a roll number is already registered
    async fn exists_by_roll(&self, roll: &RollNo) -> Result<bool, PortError> {
        Ok(self.find_by_roll(roll).await?.is_some())
    }
}

// Blanket implementation for all StudentDirectory implementors
impl<T: StudentDirectory + ?Sized> StudentDirectoryExt for T {}

/// Mock implementation of StudentDirectory for testing
///
/// This adapter stores students in memory and is useful for unit testing
/// without a database dependency.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of StudentDirectory
    #[derive(Debug, Default)]
    pub struct MockStudentDirectory {
        students: Arc<RwLock<HashMap<StudentId, Student>>>,
    }

    impl MockStudentDirectory {
        /// Creates a new mock directory
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with students for testing
        pub async fn with_students(students: Vec<Student>) -> Self {
            let directory = Self::new();
            for student in students {
                directory
                    .students
                    .write()
                    .await
                    .insert(student.id, student);
            }
            directory
        }

        /// Returns the number of stored students
        pub async fn len(&self) -> usize {
            self.students.read().await.len()
        }

        /// Returns true if no students are stored
        pub async fn is_empty(&self) -> bool {
            self.students.read().await.is_empty()
        }
    }

    impl DomainPort for MockStudentDirectory {}

    #[async_trait]
    impl HealthCheckable for MockStudentDirectory {
        async fn health_check(&self) -> core_kernel::HealthCheckResult {
            core_kernel::HealthCheckResult {
                adapter_id: "mock-student-directory".to_string(),
                status: core_kernel::AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl StudentDirectory for MockStudentDirectory {
        async fn find_by_roll(&self, roll: &RollNo) -> Result<Option<Student>, PortError> {
            let students = self.students.read().await;
            Ok(students.values().find(|s| &s.roll_no == roll).cloned())
        }

        async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, PortError> {
            Ok(self.students.read().await.get(&id).cloned())
        }

        async fn insert(&self, input: NewStudent) -> Result<Student, PortError> {
            let mut students = self.students.write().await;
            if students.values().any(|s| s.roll_no == input.roll_no) {
                return Err(PortError::conflict(format!(
                    "Student with roll number '{}' already exists",
                    input.roll_no
                )));
            }
            let student = Student::new(input);
            students.insert(student.id, student.clone());
            Ok(student)
        }

        async fn insert_many(&self, inputs: Vec<NewStudent>) -> Result<usize, PortError> {
            let mut students = self.students.write().await;
            let mut inserted = 0;
            for input in inputs {
                if students.values().any(|s| s.roll_no == input.roll_no) {
                    continue;
                }
                let student = Student::new(input);
                students.insert(student.id, student);
                inserted += 1;
            }
            Ok(inserted)
        }

        async fn update(&self, student: &Student) -> Result<Student, PortError> {
            let mut students = self.students.write().await;
            if !students.contains_key(&student.id) {
                return Err(PortError::not_found("Student", student.id));
            }
            let mut updated = student.clone();
            updated.updated_at = Utc::now();
            students.insert(updated.id, updated.clone());
            Ok(updated)
        }

        async fn delete(&self, id: StudentId) -> Result<(), PortError> {
            let mut students = self.students.write().await;
            students
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Student", id))
        }

        async fn mark_paid(&self, roll: &RollNo) -> Result<Student, PortError> {
            let mut students = self.students.write().await;
            let student = students
                .values_mut()
                .find(|s| &s.roll_no == roll)
                .ok_or_else(|| PortError::not_found("Student", roll))?;
            student.mark_paid();
            Ok(student.clone())
        }

        async fn stats(&self) -> Result<StudentStats, PortError> {
            let students = self.students.read().await;
            let total = students.len() as i64;
            let paid = students.values().filter(|s| s.has_paid).count() as i64;
            Ok(StudentStats {
                total,
                paid,
                not_paid: total - paid,
            })
        }
    }
}
