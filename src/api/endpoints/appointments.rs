//! Appointment endpoints.
//!
//! CRUD over `/api/appointments`. Every appointment references an
//! existing patient; creating one also queues a confirmation task,
//! which never delays the response.

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{Appointment, AppointmentFilter, AppointmentPayload, AppointmentStatus};
use crate::notify::ConfirmationTask;
use crate::services;

/// Optional list filters, both applied conjunctively when present.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentListQuery {
    pub status: Option<String>,
    pub patient_id: Option<String>,
}

impl AppointmentListQuery {
    /// A malformed filter value is a client error, not an empty result.
    fn into_filter(self) -> Result<AppointmentFilter, ApiError> {
        let status = match self.status {
            Some(raw) => Some(AppointmentStatus::from_str(&raw).map_err(|_| {
                ApiError::BadRequest(format!("unrecognized status filter {raw:?}"))
            })?),
            None => None,
        };
        let patient_id = match self.patient_id {
            Some(raw) => Some(Uuid::parse_str(&raw).map_err(|_| {
                ApiError::BadRequest("patientId filter must be a valid patient id".into())
            })?),
            None => None,
        };
        Ok(AppointmentFilter { status, patient_id })
    }
}

/// `POST /api/appointments` — validate and create an appointment,
/// then queue its confirmation.
pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<AppointmentPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let Json(payload) = payload?;
    let mut conn = ctx.open_db()?;
    let appointment = services::appointments::create_appointment(&mut conn, &payload)?;

    ctx.notifier().submit(ConfirmationTask {
        appointment_id: appointment.id,
        patient_id: appointment.patient_id,
        scheduled_for: appointment.appointment_date_time,
    });

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// `GET /api/appointments` — list appointments, optionally filtered
/// by `status` and `patientId`.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let filter = query.into_filter()?;
    let conn = ctx.open_db()?;
    let appointments = services::appointments::list_appointments(&conn, &filter)?;
    Ok(Json(appointments))
}

/// `GET /api/appointments/:id` — fetch one appointment.
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, ApiError> {
    let id = parse_id(&id, "appointment")?;
    let conn = ctx.open_db()?;
    let appointment = services::appointments::get_appointment(&conn, &id)?;
    Ok(Json(appointment))
}

/// `PUT /api/appointments/:id` — replace an appointment's fields.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    payload: Result<Json<AppointmentPayload>, JsonRejection>,
) -> Result<Json<Appointment>, ApiError> {
    let id = parse_id(&id, "appointment")?;
    let Json(payload) = payload?;
    let mut conn = ctx.open_db()?;
    let appointment = services::appointments::update_appointment(&mut conn, &id, &payload)?;
    Ok(Json(appointment))
}

/// `DELETE /api/appointments/:id` — delete one appointment.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, "appointment")?;
    let conn = ctx.open_db()?;
    services::appointments::delete_appointment(&conn, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
