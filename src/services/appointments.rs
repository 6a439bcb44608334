//! Appointment lifecycle: create against an existing patient, read, update,
//! delete.

use rusqlite::{Connection, TransactionBehavior};
use uuid::Uuid;

use super::ServiceError;
use crate::db::repository;
use crate::models::{Appointment, AppointmentFilter, AppointmentPayload};
use crate::validation;

/// Validate the payload, require the referenced patient, persist.
///
/// The existence check and the insert share one immediate transaction:
/// a concurrent patient deletion lands either before the check (patient
/// not-found) or after the commit (the cascade takes the new appointment
/// with it). An invalid payload never reaches the store at all.
pub fn create_appointment(
    conn: &mut Connection,
    payload: &AppointmentPayload,
) -> Result<Appointment, ServiceError> {
    let fields = validation::validate_appointment(payload)?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    if !repository::patient_exists(&tx, &fields.patient_id)? {
        return Err(ServiceError::patient_not_found(fields.patient_id));
    }
    let appointment = Appointment {
        id: Uuid::new_v4(),
        appointment_date_time: fields.appointment_date_time,
        reason_for_visit: fields.reason_for_visit,
        status: fields.status,
        patient_id: fields.patient_id,
    };
    repository::insert_appointment(&tx, &appointment)?;
    tx.commit()?;
    tracing::debug!(
        appointment_id = %appointment.id,
        patient_id = %appointment.patient_id,
        "appointment created"
    );
    Ok(appointment)
}

pub fn get_appointment(conn: &Connection, id: &Uuid) -> Result<Appointment, ServiceError> {
    repository::get_appointment(conn, id)?.ok_or_else(|| ServiceError::appointment_not_found(*id))
}

pub fn list_appointments(
    conn: &Connection,
    filter: &AppointmentFilter,
) -> Result<Vec<Appointment>, ServiceError> {
    Ok(repository::list_appointments(conn, filter)?)
}

/// Replace the scalar fields of an existing appointment. The patient
/// reference may move, but only to a patient that exists; the check and
/// the write share one immediate transaction.
pub fn update_appointment(
    conn: &mut Connection,
    id: &Uuid,
    payload: &AppointmentPayload,
) -> Result<Appointment, ServiceError> {
    let fields = validation::validate_appointment(payload)?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    if !repository::patient_exists(&tx, &fields.patient_id)? {
        return Err(ServiceError::patient_not_found(fields.patient_id));
    }
    if !repository::update_appointment(&tx, id, &fields)? {
        return Err(ServiceError::appointment_not_found(*id));
    }
    let updated = get_appointment(&tx, id)?;
    tx.commit()?;
    tracing::debug!(appointment_id = %id, "appointment updated");
    Ok(updated)
}

pub fn delete_appointment(conn: &Connection, id: &Uuid) -> Result<(), ServiceError> {
    if !repository::delete_appointment(conn, id)? {
        return Err(ServiceError::appointment_not_found(*id));
    }
    tracing::debug!(appointment_id = %id, "appointment deleted");
    Ok(())
}
