//! Patient endpoints.
//!
//! CRUD over `/api/patients`, plus the owned-appointment listing at
//! `/api/patients/:id/appointments`. Deleting a patient cascades to
//! every appointment that references it.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{Appointment, Patient, PatientPayload};
use crate::services;

/// `POST /api/patients` — validate and create a patient.
pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<PatientPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let Json(payload) = payload?;
    let conn = ctx.open_db()?;
    let patient = services::patients::create_patient(&conn, &payload)?;
    Ok((StatusCode::CREATED, Json(patient)))
}

/// `GET /api/patients` — list all patients.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Patient>>, ApiError> {
    let conn = ctx.open_db()?;
    let patients = services::patients::list_patients(&conn)?;
    Ok(Json(patients))
}

/// `GET /api/patients/:id` — fetch one patient.
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let id = parse_id(&id, "patient")?;
    let conn = ctx.open_db()?;
    let patient = services::patients::get_patient(&conn, &id)?;
    Ok(Json(patient))
}

/// `PUT /api/patients/:id` — replace a patient's fields.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    payload: Result<Json<PatientPayload>, JsonRejection>,
) -> Result<Json<Patient>, ApiError> {
    let id = parse_id(&id, "patient")?;
    let Json(payload) = payload?;
    let conn = ctx.open_db()?;
    let patient = services::patients::update_patient(&conn, &id, &payload)?;
    Ok(Json(patient))
}

/// `DELETE /api/patients/:id` — delete a patient and its appointments.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, "patient")?;
    let mut conn = ctx.open_db()?;
    services::patients::delete_patient(&mut conn, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/patients/:id/appointments` — full records of the
/// patient's appointments, oldest first.
pub async fn appointments(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let id = parse_id(&id, "patient")?;
    let conn = ctx.open_db()?;
    let appointments = services::patients::appointments_for_patient(&conn, &id)?;
    Ok(Json(appointments))
}
