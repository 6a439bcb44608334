use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::AppointmentStatus;

/// A scheduled, completed or cancelled visit, always owned by one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub appointment_date_time: NaiveDateTime,
    pub reason_for_visit: String,
    pub status: AppointmentStatus,
    pub patient_id: Uuid,
}

/// Incoming create/update body for an appointment.
///
/// `status` and `patient_id` arrive as raw strings so that unrecognized
/// values show up as field errors instead of a bare deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPayload {
    pub appointment_date_time: Option<NaiveDateTime>,
    pub reason_for_visit: Option<String>,
    pub status: Option<String>,
    pub patient_id: Option<String>,
}

/// Validated scalar fields of an appointment, shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentFields {
    pub appointment_date_time: NaiveDateTime,
    pub reason_for_visit: String,
    pub status: AppointmentStatus,
    pub patient_id: Uuid,
}
