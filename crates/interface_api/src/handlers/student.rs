//! Student directory handlers
//!
//! Routes mirror the admin frontend's contract: every mutation answers with a
//! message plus the affected student, and lookup misses answer 404 with
//! "Student not found".

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use core_kernel::StudentId;
use domain_student::RollNo;

use crate::dto::student::*;
use crate::dto::MessageResponse;
use crate::error::ApiError;
use crate::AppState;

/// Adds a single student from the manual entry form
#[instrument(skip(state, request))]
pub async fn add_manual(
    State(state): State<AppState>,
    Json(request): Json<AddStudentRequest>,
) -> Result<(StatusCode, Json<StudentMessageResponse>), ApiError> {
    let input = request.into_new_student()?;

    match state.students.insert(input).await {
        Ok(student) => Ok((
            StatusCode::CREATED,
            Json(StudentMessageResponse::new(
                "Student added successfully",
                student,
            )),
        )),
        Err(e) if e.is_conflict() => Err(ApiError::Conflict("Student already exists".to_string())),
        Err(e) => Err(e.into()),
    }
}

/// Bulk-inserts students parsed from an uploaded sheet
///
/// Rows with missing or malformed fields are rejected wholesale at
/// deserialization; duplicate roll numbers inside a valid batch are skipped
/// and excluded from the reported count.
#[instrument(skip(state, rows), fields(rows = rows.len()))]
pub async fn bulk_insert(
    State(state): State<AppState>,
    Json(rows): Json<Vec<BulkStudentRow>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let inputs = rows.into_iter().map(Into::into).collect();
    let inserted = state.students.insert_many(inputs).await?;

    Ok(Json(MessageResponse::new(format!(
        "{inserted} students inserted successfully."
    ))))
}

/// Updates a student's editable fields
#[instrument(skip(state, request))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStudentRequest>,
) -> Result<Json<StudentMessageResponse>, ApiError> {
    let id: StudentId = id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid student id".to_string()))?;

    let mut student = state
        .students
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    request.apply_to(&mut student);
    let student = state.students.update(&student).await?;

    Ok(Json(StudentMessageResponse::new("Student updated", student)))
}

/// Deletes a student
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudentMessageResponse>, ApiError> {
    let id: StudentId = id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid student id".to_string()))?;

    // Fetch first so the response can echo what was removed.
    let student = state
        .students
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    state.students.delete(id).await?;

    Ok(Json(StudentMessageResponse::new("Student deleted", student)))
}

/// Flags a student as paid by roll number
#[instrument(skip(state))]
pub async fn mark_paid(
    State(state): State<AppState>,
    Path(roll_no): Path<String>,
) -> Result<Json<StudentMessageResponse>, ApiError> {
    let student = state.students.mark_paid(&RollNo::new(roll_no)).await?;

    Ok(Json(StudentMessageResponse::new(
        "Payment status updated to Paid",
        student,
    )))
}

/// Looks up a student by roll number
#[instrument(skip(state))]
pub async fn get_by_roll(
    State(state): State<AppState>,
    Path(roll_no): Path<String>,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = state
        .students
        .find_by_roll(&RollNo::new(roll_no))
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    Ok(Json(student.into()))
}

/// Returns directory-wide paid/unpaid counts
#[instrument(skip(state))]
pub async fn stats(
    State(state): State<AppState>,
) -> Result<Json<StudentStatsResponse>, ApiError> {
    let stats = state.students.stats().await?;
    Ok(Json(stats.into()))
}
