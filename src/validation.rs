//! Field validation for incoming payloads.
//!
//! Rules are pure functions over a single value. Entity validators run every
//! rule and collect all violations into one field-to-message map, so a single
//! response reports everything wrong with a body. On success they yield the
//! typed field sets consumed by the services.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::models::enums::AppointmentStatus;
use crate::models::{AppointmentFields, AppointmentPayload, PatientFields, PatientPayload};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;

/// All violations for one payload, keyed by wire field name.
///
/// BTreeMap keeps serialization order stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field} {message}")?;
            first = false;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════
// Field rules
// ═══════════════════════════════════════════

/// Person names: non-empty after trimming, length within bounds.
fn name_rule(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("must not be empty".into());
    }
    let chars = trimmed.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        return Err(format!(
            "must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"
        ));
    }
    Ok(trimmed.to_string())
}

/// Birth dates may be today but never after it.
fn birth_date_rule(value: NaiveDate) -> Result<NaiveDate, String> {
    if value > chrono::Local::now().date_naive() {
        return Err("must not be in the future".into());
    }
    Ok(value)
}

fn non_empty_rule(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("must not be empty".into());
    }
    Ok(trimmed.to_string())
}

fn status_rule(value: &str) -> Result<AppointmentStatus, String> {
    AppointmentStatus::from_str(value.trim()).map_err(|_| {
        let allowed: Vec<&str> = AppointmentStatus::ALL.iter().map(|s| s.as_str()).collect();
        format!("must be one of {}", allowed.join(", "))
    })
}

fn patient_id_rule(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| "must be a valid patient id".into())
}

// ═══════════════════════════════════════════
// Entity validators
// ═══════════════════════════════════════════

/// Record "is required" for a missing value, otherwise pass it through.
fn required<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<T>,
) -> Option<T> {
    if value.is_none() {
        errors.push(field, "is required");
    }
    value
}

/// Require the value, then run its rule; any violation lands in `errors`.
fn checked<T, U>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<T>,
    rule: impl FnOnce(T) -> Result<U, String>,
) -> Option<U> {
    match value {
        None => {
            errors.push(field, "is required");
            None
        }
        Some(v) => match rule(v) {
            Ok(ok) => Some(ok),
            Err(message) => {
                errors.push(field, message);
                None
            }
        },
    }
}

pub fn validate_patient(payload: &PatientPayload) -> Result<PatientFields, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let first_name = checked(&mut errors, "firstName", payload.first_name.as_deref(), name_rule);
    let last_name = checked(&mut errors, "lastName", payload.last_name.as_deref(), name_rule);
    let date_of_birth = checked(
        &mut errors,
        "dateOfBirth",
        payload.date_of_birth,
        birth_date_rule,
    );
    let contact_number = checked(
        &mut errors,
        "contactNumber",
        payload.contact_number.as_deref(),
        non_empty_rule,
    );

    match (first_name, last_name, date_of_birth, contact_number) {
        (Some(first_name), Some(last_name), Some(date_of_birth), Some(contact_number)) => {
            Ok(PatientFields {
                first_name,
                last_name,
                date_of_birth,
                contact_number,
            })
        }
        _ => Err(errors),
    }
}

pub fn validate_appointment(
    payload: &AppointmentPayload,
) -> Result<AppointmentFields, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let appointment_date_time = required(
        &mut errors,
        "appointmentDateTime",
        payload.appointment_date_time,
    );
    let reason_for_visit = checked(
        &mut errors,
        "reasonForVisit",
        payload.reason_for_visit.as_deref(),
        non_empty_rule,
    );
    let status = checked(&mut errors, "status", payload.status.as_deref(), status_rule);
    let patient_id = checked(
        &mut errors,
        "patientId",
        payload.patient_id.as_deref(),
        patient_id_rule,
    );

    match (appointment_date_time, reason_for_visit, status, patient_id) {
        (Some(appointment_date_time), Some(reason_for_visit), Some(status), Some(patient_id)) => {
            Ok(AppointmentFields {
                appointment_date_time,
                reason_for_visit,
                status,
                patient_id,
            })
        }
        _ => Err(errors),
    }
}
