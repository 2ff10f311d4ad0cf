//! Student entity and its value objects
//!
//! This module defines the Student aggregate which represents a registered
//! attendee of the fest. A student is identified administratively by a
//! generated `StudentId` and operationally by a university roll number,
//! which billing uses as the lookup key.
//!
//! # Roll Numbers
//!
//! Roll numbers arrive from spreadsheets and form fields in inconsistent
//! shapes, so `RollNo` trims surrounding whitespace on construction and every
//! lookup goes through the trimmed form. Whatever characters remain are kept
//! verbatim; the directory does not impose a format.
//!
//! # Examples
//!
//! ```rust
//! use domain_student::student::{NewStudent, RollNo, Section, Student, Year};
//!
//! let new_student = NewStudent {
//!     roll_no: RollNo::new("  CS101 "),
//!     name: "Asha Verma".to_string(),
//!     year: Year::Second,
//!     section: Section::A,
//! };
//!
//! let student = Student::new(new_student);
//! assert_eq!(student.roll_no.as_str(), "CS101");
//! assert!(!student.has_paid);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::StudentId;

use crate::error::StudentError;

/// A university roll number, trimmed on construction
///
/// The trimmed string is the identity key of a student within the directory:
/// at most one student may hold a given roll number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RollNo(String);

impl RollNo {
    /// Creates a roll number, trimming surrounding whitespace
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    /// Returns the trimmed roll number
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if nothing remains after trimming
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RollNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RollNo {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

// Deserialization trims exactly like the constructor.
impl<'de> Deserialize<'de> for RollNo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(RollNo::new(raw))
    }
}

/// Academic year of study
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Year {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
    #[serde(rename = "4th")]
    Fourth,
}

impl Year {
    /// Returns the wire spelling used in storage and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Year::First => "1st",
            Year::Second => "2nd",
            Year::Third => "3rd",
            Year::Fourth => "4th",
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Year {
    type Err = StudentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1st" => Ok(Year::First),
            "2nd" => Ok(Year::Second),
            "3rd" => Ok(Year::Third),
            "4th" => Ok(Year::Fourth),
            other => Err(StudentError::invalid(format!(
                "Unknown year '{}', expected one of 1st, 2nd, 3rd, 4th",
                other
            ))),
        }
    }
}

/// Class section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    A,
    B,
    C,
}

impl Section {
    /// Returns the wire spelling used in storage and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::A => "A",
            Section::B => "B",
            Section::C => "C",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Section {
    type Err = StudentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" => Ok(Section::A),
            "B" => Ok(Section::B),
            "C" => Ok(Section::C),
            other => Err(StudentError::invalid(format!(
                "Unknown section '{}', expected one of A, B, C",
                other
            ))),
        }
    }
}

/// Input for registering a student
///
/// All four fields are required; the paid flag always starts false and is
/// therefore not part of the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    /// University roll number (unique within the directory)
    pub roll_no: RollNo,
    /// Full name
    pub name: String,
    /// Year of study
    pub year: Year,
    /// Class section
    pub section: Section,
}

/// A registered student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier
    pub id: StudentId,
    /// University roll number (unique, immutable identity key)
    pub roll_no: RollNo,
    /// Full name
    pub name: String,
    /// Year of study
    pub year: Year,
    /// Class section
    pub section: Section,
    /// Whether the registration fee has been collected
    pub has_paid: bool,
    /// When this student was created
    pub created_at: DateTime<Utc>,
    /// When this student was last updated
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Creates a new student from registration input
    ///
    /// The paid flag starts false; only the explicit mark-paid operation
    /// ever sets it.
    pub fn new(input: NewStudent) -> Self {
        let now = Utc::now();
        Self {
            id: StudentId::new_v7(),
            roll_no: input.roll_no,
            name: input.name,
            year: input.year,
            section: input.section,
            has_paid: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the registration fee as collected
    pub fn mark_paid(&mut self) {
        self.has_paid = true;
        self.updated_at = Utc::now();
    }

    /// Bumps the updated timestamp after an administrative edit
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Aggregate paid/unpaid counts over the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentStats {
    /// Total number of registered students
    pub total: i64,
    /// Students with the paid flag set
    pub paid: i64,
    /// Students without the paid flag
    pub not_paid: i64,
}
