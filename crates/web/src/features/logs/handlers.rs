use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::fitness_log::{
        CreateLogRequest, DeleteLastRequest, DeleteLastResponse, PeriodQueryRequest,
    },
    error::StorageError,
    models::FitnessLogEntry,
    services::time_window::Period,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

// Request fields arrive as Options so that an absent field surfaces as a
// 400 with a message naming it, rather than a body-level decode rejection.
fn required<T>(field: Option<T>, name: &str) -> Result<T, WebError> {
    field.ok_or_else(|| WebError::BadRequest(format!("Missing required field: {}", name)))
}

#[utoipa::path(
    post,
    path = "/log",
    request_body = CreateLogRequest,
    responses(
        (status = 201, description = "Log entry created with its set number for the day", body = FitnessLogEntry),
        (status = 400, description = "Missing or invalid fields"),
        (status = 500, description = "Internal server error")
    ),
    tag = "logs"
)]
pub async fn create_log(
    State(db): State<Database>,
    Json(req): Json<CreateLogRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user_id = required(req.user_id, "user_id")?.to_string();
    let action = required(req.action, "action")?;
    let reps = required(req.reps, "reps")?;
    let weight = required(req.weight, "weight")?;

    let entry = services::create_log(db.pool(), &user_id, &action, reps, weight).await?;

    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

#[utoipa::path(
    post,
    path = "/logs/period",
    request_body = PeriodQueryRequest,
    responses(
        (status = 200, description = "Entries from the period start onwards, newest first", body = Vec<FitnessLogEntry>),
        (status = 400, description = "Missing user_id or unknown period"),
        (status = 500, description = "Internal server error")
    ),
    tag = "logs"
)]
pub async fn list_logs_by_period(
    State(db): State<Database>,
    Json(req): Json<PeriodQueryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user_id = required(req.user_id, "user_id")?.to_string();
    let period: Period = required(req.period, "period")?
        .parse()
        .map_err(WebError::BadRequest)?;

    let entries = services::list_logs_for_period(db.pool(), &user_id, period).await?;

    Ok(Json(entries).into_response())
}

#[utoipa::path(
    post,
    path = "/log/delete-last",
    request_body = DeleteLastRequest,
    responses(
        (status = 200, description = "Most recent log entry removed", body = DeleteLastResponse),
        (status = 400, description = "Missing user_id"),
        (status = 404, description = "User has no log entries"),
        (status = 500, description = "Internal server error")
    ),
    tag = "logs"
)]
pub async fn delete_last_log(
    State(db): State<Database>,
    Json(req): Json<DeleteLastRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user_id = required(req.user_id, "user_id")?.to_string();

    match services::delete_last_log(db.pool(), &user_id).await {
        Ok(()) => Ok(Json(DeleteLastResponse {
            success: true,
            message: "Successfully removed the most recent log entry.".to_string(),
        })
        .into_response()),
        Err(StorageError::NotFound) => Err(WebError::NotFound(
            "No log entries found for this user".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}
