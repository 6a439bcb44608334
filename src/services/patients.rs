//! Patient lifecycle: create, read, update, cascade delete.

use rusqlite::Connection;
use uuid::Uuid;

use super::ServiceError;
use crate::db::repository;
use crate::models::{Appointment, Patient, PatientPayload};
use crate::validation;

/// Validate the payload, assign a fresh id and persist. Nothing is written
/// when validation fails.
pub fn create_patient(
    conn: &Connection,
    payload: &PatientPayload,
) -> Result<Patient, ServiceError> {
    let fields = validation::validate_patient(payload)?;
    let patient = Patient {
        id: Uuid::new_v4(),
        first_name: fields.first_name,
        last_name: fields.last_name,
        date_of_birth: fields.date_of_birth,
        contact_number: fields.contact_number,
        appointments: Vec::new(),
    };
    repository::insert_patient(conn, &patient)?;
    tracing::debug!(patient_id = %patient.id, "patient created");
    Ok(patient)
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Patient, ServiceError> {
    repository::get_patient(conn, id)?.ok_or_else(|| ServiceError::patient_not_found(*id))
}

pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, ServiceError> {
    Ok(repository::list_patients(conn)?)
}

/// Replace the scalar fields of an existing patient; the id never changes.
pub fn update_patient(
    conn: &Connection,
    id: &Uuid,
    payload: &PatientPayload,
) -> Result<Patient, ServiceError> {
    let fields = validation::validate_patient(payload)?;
    if !repository::update_patient(conn, id, &fields)? {
        return Err(ServiceError::patient_not_found(*id));
    }
    tracing::debug!(patient_id = %id, "patient updated");
    get_patient(conn, id)
}

/// Delete the patient and every appointment it owns, atomically.
pub fn delete_patient(conn: &mut Connection, id: &Uuid) -> Result<(), ServiceError> {
    match repository::delete_patient_cascade(conn, id)? {
        Some(cascaded) => {
            tracing::info!(patient_id = %id, cascaded, "patient deleted with owned appointments");
            Ok(())
        }
        None => Err(ServiceError::patient_not_found(*id)),
    }
}

/// Full appointment records owned by one patient.
pub fn appointments_for_patient(
    conn: &Connection,
    id: &Uuid,
) -> Result<Vec<Appointment>, ServiceError> {
    if !repository::patient_exists(conn, id)? {
        return Err(ServiceError::patient_not_found(*id));
    }
    Ok(repository::appointments_for_patient(conn, id)?)
}
