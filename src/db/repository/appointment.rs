use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, params_from_iter, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::AppointmentStatus;
use crate::models::{Appointment, AppointmentFields, AppointmentFilter};

// %.f keeps sub-second precision without breaking the TEXT column's
// lexicographic order; whole seconds store without a trailing dot.
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (id, appointment_date_time, reason_for_visit, status, patient_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            appt.id.to_string(),
            appt.appointment_date_time.format(DATE_TIME_FORMAT).to_string(),
            appt.reason_for_visit,
            appt.status.as_str(),
            appt.patient_id.to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_appointment(conn: &Connection, id: &Uuid) -> Result<Option<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, appointment_date_time, reason_for_visit, status, patient_id
         FROM appointments WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], |row| {
        Ok(appointment_row_from_rusqlite(row))
    });

    match result {
        Ok(row) => Ok(Some(appointment_from_row(row?)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_appointments(
    conn: &Connection,
    filter: &AppointmentFilter,
) -> Result<Vec<Appointment>, DatabaseError> {
    let mut sql = String::from(
        "SELECT id, appointment_date_time, reason_for_visit, status, patient_id FROM appointments",
    );
    let mut clauses: Vec<&str> = Vec::new();
    let mut args: Vec<String> = Vec::new();

    if let Some(status) = filter.status {
        clauses.push("status = ?");
        args.push(status.as_str().to_string());
    }
    if let Some(patient_id) = filter.patient_id {
        clauses.push("patient_id = ?");
        args.push(patient_id.to_string());
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY appointment_date_time, id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), |row| {
        Ok(appointment_row_from_rusqlite(row))
    })?;

    let mut appointments = Vec::new();
    for row in rows {
        appointments.push(appointment_from_row(row??)?);
    }
    Ok(appointments)
}

/// Full appointment records owned by one patient, ordered by visit time then id.
pub fn appointments_for_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<Appointment>, DatabaseError> {
    list_appointments(
        conn,
        &AppointmentFilter {
            patient_id: Some(*patient_id),
            ..Default::default()
        },
    )
}

/// Replace the scalar fields of an appointment. Returns false when the id is
/// absent. Reassigning `patient_id` to a missing patient trips the foreign
/// key and surfaces as an error; callers check existence first for a clean
/// not-found outcome.
pub fn update_appointment(
    conn: &Connection,
    id: &Uuid,
    fields: &AppointmentFields,
) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "UPDATE appointments
         SET appointment_date_time = ?2, reason_for_visit = ?3, status = ?4, patient_id = ?5
         WHERE id = ?1",
        params![
            id.to_string(),
            fields.appointment_date_time.format(DATE_TIME_FORMAT).to_string(),
            fields.reason_for_visit,
            fields.status.as_str(),
            fields.patient_id.to_string(),
        ],
    )?;
    Ok(changed > 0)
}

/// Returns false when the id is absent.
pub fn delete_appointment(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "DELETE FROM appointments WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(changed > 0)
}

pub fn count_appointments(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM appointments", [], |row| row.get(0))?;
    Ok(count)
}

// Internal row type for Appointment mapping
struct AppointmentRow {
    id: String,
    appointment_date_time: String,
    reason_for_visit: String,
    status: String,
    patient_id: String,
}

fn appointment_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<AppointmentRow, rusqlite::Error> {
    Ok(AppointmentRow {
        id: row.get(0)?,
        appointment_date_time: row.get(1)?,
        reason_for_visit: row.get(2)?,
        status: row.get(3)?,
        patient_id: row.get(4)?,
    })
}

fn appointment_from_row(row: AppointmentRow) -> Result<Appointment, DatabaseError> {
    Ok(Appointment {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        appointment_date_time: NaiveDateTime::parse_from_str(
            &row.appointment_date_time,
            DATE_TIME_FORMAT,
        )
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        reason_for_visit: row.reason_for_visit,
        status: AppointmentStatus::from_str(&row.status)?,
        patient_id: Uuid::parse_str(&row.patient_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
    })
}
