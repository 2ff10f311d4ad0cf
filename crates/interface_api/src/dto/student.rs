//! Student DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain_student::{NewStudent, RollNo, Section, Student, StudentStats, Year};

use crate::error::ApiError;

/// Manual registration request
///
/// Fields are optional at the serde level so that a missing field produces
/// the frontend's expected 400 message instead of a deserialization error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStudentRequest {
    pub university_roll_no: Option<String>,
    pub name: Option<String>,
    pub year: Option<String>,
    pub section: Option<String>,
}

impl AddStudentRequest {
    /// Validates presence of all four fields and parses the enumerations
    pub fn into_new_student(self) -> Result<NewStudent, ApiError> {
        let missing = || ApiError::BadRequest("All fields are required".to_string());
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let roll = present(self.university_roll_no).ok_or_else(missing)?;
        let name = present(self.name).ok_or_else(missing)?;
        let year = present(self.year).ok_or_else(missing)?;
        let section = present(self.section).ok_or_else(missing)?;

        Ok(NewStudent {
            roll_no: RollNo::new(roll),
            name: name.trim().to_string(),
            year: year
                .parse::<Year>()
                .map_err(|e| ApiError::Validation(e.to_string()))?,
            section: section
                .parse::<Section>()
                .map_err(|e| ApiError::Validation(e.to_string()))?,
        })
    }
}

/// One already-parsed row of a bulk registration
///
/// All fields are required; an incomplete row fails the whole request at
/// deserialization. Rows whose roll number already exists are skipped by
/// the directory.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkStudentRow {
    pub university_roll_no: RollNo,
    pub name: String,
    pub year: Year,
    pub section: Section,
}

impl From<BulkStudentRow> for NewStudent {
    fn from(row: BulkStudentRow) -> Self {
        NewStudent {
            roll_no: row.university_roll_no,
            name: row.name,
            year: row.year,
            section: row.section,
        }
    }
}

/// Partial administrative update
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub university_roll_no: Option<RollNo>,
    pub name: Option<String>,
    pub year: Option<Year>,
    pub section: Option<Section>,
    pub has_paid: Option<bool>,
}

impl UpdateStudentRequest {
    /// Applies the present fields onto the student
    pub fn apply_to(self, student: &mut Student) {
        if let Some(roll_no) = self.university_roll_no {
            student.roll_no = roll_no;
        }
        if let Some(name) = self.name {
            student.name = name;
        }
        if let Some(year) = self.year {
            student.year = year;
        }
        if let Some(section) = self.section {
            student.section = section;
        }
        if let Some(has_paid) = self.has_paid {
            student.has_paid = has_paid;
        }
    }
}

/// A student as the API presents it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: String,
    pub university_roll_no: String,
    pub name: String,
    pub year: Year,
    pub section: Section,
    pub has_paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id.to_string(),
            university_roll_no: student.roll_no.as_str().to_string(),
            name: student.name,
            year: student.year,
            section: student.section,
            has_paid: student.has_paid,
            created_at: student.created_at,
            updated_at: student.updated_at,
        }
    }
}

/// Message plus the affected student, for mutation endpoints
#[derive(Debug, Serialize)]
pub struct StudentMessageResponse {
    pub message: String,
    pub student: StudentResponse,
}

impl StudentMessageResponse {
    pub fn new(message: impl Into<String>, student: Student) -> Self {
        Self {
            message: message.into(),
            student: student.into(),
        }
    }
}

/// Directory head counts
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStatsResponse {
    pub total: i64,
    pub paid: i64,
    pub not_paid: i64,
}

impl From<StudentStats> for StudentStatsResponse {
    fn from(stats: StudentStats) -> Self {
        Self {
            total: stats.total,
            paid: stats.paid,
            not_paid: stats.not_paid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_rejected_with_the_frontend_message() {
        let request = AddStudentRequest {
            university_roll_no: Some("CS101".to_string()),
            name: None,
            year: Some("2nd".to_string()),
            section: Some("A".to_string()),
        };
        let err = request.into_new_student().unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(msg) if msg == "All fields are required"));
    }

    #[test]
    fn test_blank_field_counts_as_missing() {
        let request = AddStudentRequest {
            university_roll_no: Some("   ".to_string()),
            name: Some("Asha".to_string()),
            year: Some("2nd".to_string()),
            section: Some("A".to_string()),
        };
        assert!(request.into_new_student().is_err());
    }

    #[test]
    fn test_complete_request_parses_the_enums() {
        let request = AddStudentRequest {
            university_roll_no: Some(" CS101 ".to_string()),
            name: Some("Asha Verma".to_string()),
            year: Some("3rd".to_string()),
            section: Some("B".to_string()),
        };
        let input = request.into_new_student().unwrap();
        assert_eq!(input.roll_no.as_str(), "CS101");
        assert_eq!(input.year, Year::Third);
        assert_eq!(input.section, Section::B);
    }

    #[test]
    fn test_bad_year_is_a_validation_error() {
        let request = AddStudentRequest {
            university_roll_no: Some("CS101".to_string()),
            name: Some("Asha".to_string()),
            year: Some("5th".to_string()),
            section: Some("A".to_string()),
        };
        let err = request.into_new_student().unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_bulk_row_uses_wire_spellings() {
        let row: BulkStudentRow = serde_json::from_str(
            r#"{"universityRollNo": "EC2101", "name": "Ravi", "year": "1st", "section": "C"}"#,
        )
        .unwrap();
        assert_eq!(row.year, Year::First);
        assert_eq!(row.section, Section::C);

        let input = NewStudent::from(row);
        assert_eq!(input.roll_no.as_str(), "EC2101");
    }

    #[test]
    fn test_student_response_uses_camel_case_keys() {
        let student = Student::new(NewStudent {
            roll_no: RollNo::new("CS101"),
            name: "Asha Verma".to_string(),
            year: Year::Second,
            section: Section::A,
        });
        let json = serde_json::to_value(StudentResponse::from(student)).unwrap();
        assert_eq!(json["universityRollNo"], "CS101");
        assert_eq!(json["hasPaid"], false);
        assert_eq!(json["year"], "2nd");
        assert!(json["id"].as_str().unwrap().starts_with("STU-"));
    }

    #[test]
    fn test_partial_update_touches_only_present_fields() {
        let mut student = Student::new(NewStudent {
            roll_no: RollNo::new("CS101"),
            name: "Asha Verma".to_string(),
            year: Year::Second,
            section: Section::A,
        });
        let request: UpdateStudentRequest =
            serde_json::from_str(r#"{"year": "4th", "hasPaid": true}"#).unwrap();
        request.apply_to(&mut student);

        assert_eq!(student.year, Year::Fourth);
        assert!(student.has_paid);
        assert_eq!(student.name, "Asha Verma");
        assert_eq!(student.section, Section::A);
    }
}
