//! SQLite student directory
//!
//! Implements the `StudentDirectory` port over the `students` table. The
//! roll number's uniqueness lives in the schema; a duplicate insert comes
//! back from the driver as a unique violation and surfaces as a conflict.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError, StudentId,
};
use domain_student::{NewStudent, RollNo, Section, Student, StudentDirectory, StudentStats, Year};

use crate::error::DatabaseError;

/// SQLite-backed implementation of the StudentDirectory port
#[derive(Debug, Clone)]
pub struct SqliteStudentDirectory {
    pool: SqlitePool,
}

impl SqliteStudentDirectory {
    /// Creates a new repository over the given pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Database row for a student
#[derive(Debug, Clone, FromRow)]
struct StudentRow {
    student_id: String,
    roll_no: String,
    name: String,
    year: String,
    section: String,
    has_paid: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn row_to_student(row: StudentRow) -> Result<Student, DatabaseError> {
    let id = Uuid::parse_str(&row.student_id)
        .map_err(|e| DatabaseError::bad_column("student_id", e))?;
    let year = row
        .year
        .parse::<Year>()
        .map_err(|e| DatabaseError::bad_column("year", e))?;
    let section = row
        .section
        .parse::<Section>()
        .map_err(|e| DatabaseError::bad_column("section", e))?;

    Ok(Student {
        id: StudentId::from(id),
        roll_no: RollNo::new(row.roll_no),
        name: row.name,
        year,
        section,
        has_paid: row.has_paid,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

const SELECT_COLUMNS: &str =
    "student_id, roll_no, name, year, section, has_paid, created_at, updated_at";

impl DomainPort for SqliteStudentDirectory {}

#[async_trait]
impl HealthCheckable for SqliteStudentDirectory {
    /// Checks database connectivity with a trivial query
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: "sqlite-student-directory".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "sqlite-student-directory".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl StudentDirectory for SqliteStudentDirectory {
    #[instrument(skip(self), fields(roll_no = %roll))]
    async fn find_by_roll(&self, roll: &RollNo) -> Result<Option<Student>, PortError> {
        debug!("Fetching student by roll number");

        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {} FROM students WHERE roll_no = ?",
            SELECT_COLUMNS
        ))
        .bind(roll.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        row.map(row_to_student).transpose().map_err(PortError::from)
    }

    #[instrument(skip(self), fields(student_id = %id))]
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, PortError> {
        debug!("Fetching student by id");

        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {} FROM students WHERE student_id = ?",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid().to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        row.map(row_to_student).transpose().map_err(PortError::from)
    }

    #[instrument(skip(self, input), fields(roll_no = %input.roll_no))]
    async fn insert(&self, input: NewStudent) -> Result<Student, PortError> {
        debug!("Registering student");

        let student = Student::new(input);
        let result = sqlx::query(
            "INSERT INTO students \
             (student_id, roll_no, name, year, section, has_paid, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(student.id.as_uuid().to_string())
        .bind(student.roll_no.as_str())
        .bind(&student.name)
        .bind(student.year.as_str())
        .bind(student.section.as_str())
        .bind(student.has_paid)
        .bind(student.created_at)
        .bind(student.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(student),
            Err(e) => {
                let db_error = DatabaseError::from(e);
                if db_error.is_constraint_violation() {
                    Err(PortError::conflict(format!(
                        "Student with roll number '{}' already exists",
                        student.roll_no
                    )))
                } else {
                    Err(db_error.into())
                }
            }
        }
    }

    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    async fn insert_many(&self, inputs: Vec<NewStudent>) -> Result<usize, PortError> {
        debug!("Registering student batch");

        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;
        let mut inserted = 0usize;

        for input in inputs {
            let student = Student::new(input);
            // OR IGNORE skips rolls that already exist, in storage or
            // earlier in this same batch.
            let result = sqlx::query(
                "INSERT OR IGNORE INTO students \
                 (student_id, roll_no, name, year, section, has_paid, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(student.id.as_uuid().to_string())
            .bind(student.roll_no.as_str())
            .bind(&student.name)
            .bind(student.year.as_str())
            .bind(student.section.as_str())
            .bind(student.has_paid)
            .bind(student.created_at)
            .bind(student.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::from)?;

            inserted += result.rows_affected() as usize;
        }

        tx.commit().await.map_err(DatabaseError::from)?;

        debug!(inserted, "Student batch committed");
        Ok(inserted)
    }

    #[instrument(skip(self, student), fields(student_id = %student.id))]
    async fn update(&self, student: &Student) -> Result<Student, PortError> {
        debug!("Updating student");

        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "UPDATE students \
             SET roll_no = ?, name = ?, year = ?, section = ?, has_paid = ?, updated_at = ? \
             WHERE student_id = ? \
             RETURNING {}",
            SELECT_COLUMNS
        ))
        .bind(student.roll_no.as_str())
        .bind(&student.name)
        .bind(student.year.as_str())
        .bind(student.section.as_str())
        .bind(student.has_paid)
        .bind(Utc::now())
        .bind(student.id.as_uuid().to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        match row {
            Some(row) => row_to_student(row).map_err(PortError::from),
            None => Err(PortError::not_found("Student", student.id)),
        }
    }

    #[instrument(skip(self), fields(student_id = %id))]
    async fn delete(&self, id: StudentId) -> Result<(), PortError> {
        debug!("Deleting student");

        let result = sqlx::query("DELETE FROM students WHERE student_id = ?")
            .bind(id.as_uuid().to_string())
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            return Err(PortError::not_found("Student", id));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(roll_no = %roll))]
    async fn mark_paid(&self, roll: &RollNo) -> Result<Student, PortError> {
        debug!("Marking student as paid");

        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "UPDATE students SET has_paid = 1, updated_at = ? WHERE roll_no = ? RETURNING {}",
            SELECT_COLUMNS
        ))
        .bind(Utc::now())
        .bind(roll.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        match row {
            Some(row) => row_to_student(row).map_err(PortError::from),
            None => Err(PortError::not_found("Student", roll)),
        }
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> Result<StudentStats, PortError> {
        let (total, paid) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*), COALESCE(SUM(has_paid), 0) FROM students",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(StudentStats {
            total,
            paid,
            not_paid: total - paid,
        })
    }
}
