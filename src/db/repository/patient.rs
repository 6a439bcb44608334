use std::collections::HashMap;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Patient, PatientFields};

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id, first_name, last_name, date_of_birth, contact_number)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            patient.id.to_string(),
            patient.first_name,
            patient.last_name,
            patient.date_of_birth.to_string(),
            patient.contact_number,
        ],
    )?;
    Ok(())
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Option<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, date_of_birth, contact_number
         FROM patients WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], |row| Ok(patient_row_from_rusqlite(row)));

    match result {
        Ok(row) => {
            let appointments = appointment_ids_for_patient(conn, id)?;
            Ok(Some(patient_from_row(row?, appointments)?))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, date_of_birth, contact_number
         FROM patients ORDER BY last_name, first_name, id",
    )?;

    let rows = stmt.query_map([], |row| Ok(patient_row_from_rusqlite(row)))?;

    // One pass over the appointments table instead of a query per patient.
    let index = appointment_id_index(conn)?;

    let mut patients = Vec::new();
    for row in rows {
        let row = row??;
        let appointments = index
            .get(row.id.as_str())
            .cloned()
            .unwrap_or_default();
        patients.push(patient_from_row(row, appointments)?);
    }
    Ok(patients)
}

/// Replace the scalar fields of a patient. Returns false when the id is absent.
pub fn update_patient(
    conn: &Connection,
    id: &Uuid,
    fields: &PatientFields,
) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "UPDATE patients
         SET first_name = ?2, last_name = ?3, date_of_birth = ?4, contact_number = ?5
         WHERE id = ?1",
        params![
            id.to_string(),
            fields.first_name,
            fields.last_name,
            fields.date_of_birth.to_string(),
            fields.contact_number,
        ],
    )?;
    Ok(changed > 0)
}

/// Delete a patient and every appointment it owns in one transaction.
///
/// Returns the number of appointments removed, or None when the patient does
/// not exist. Readers never observe the patient gone while its appointments
/// remain, or the reverse.
pub fn delete_patient_cascade(
    conn: &mut Connection,
    id: &Uuid,
) -> Result<Option<usize>, DatabaseError> {
    let tx = conn.transaction()?;
    let appointments_removed = tx.execute(
        "DELETE FROM appointments WHERE patient_id = ?1",
        params![id.to_string()],
    )?;
    let patients_removed = tx.execute("DELETE FROM patients WHERE id = ?1", params![id.to_string()])?;
    tx.commit()?;

    if patients_removed == 0 {
        Ok(None)
    } else {
        Ok(Some(appointments_removed))
    }
}

pub fn patient_exists(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM patients WHERE id = ?1",
        params![id.to_string()],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Derived appointment-id index for one patient, ordered by visit time then id.
pub fn appointment_ids_for_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<Uuid>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id FROM appointments WHERE patient_id = ?1
         ORDER BY appointment_date_time, id",
    )?;

    let rows = stmt.query_map(params![patient_id.to_string()], |row| row.get::<_, String>(0))?;

    let mut ids = Vec::new();
    for raw in rows {
        ids.push(parse_uuid(&raw?)?);
    }
    Ok(ids)
}

/// Appointment ids grouped by owning patient, for list enrichment.
fn appointment_id_index(conn: &Connection) -> Result<HashMap<String, Vec<Uuid>>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT patient_id, id FROM appointments ORDER BY appointment_date_time, id")?;

    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut index: HashMap<String, Vec<Uuid>> = HashMap::new();
    for row in rows {
        let (patient_id, id) = row?;
        index.entry(patient_id).or_default().push(parse_uuid(&id)?);
    }
    Ok(index)
}

fn parse_uuid(raw: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(raw).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}

// Internal row type for Patient mapping
struct PatientRow {
    id: String,
    first_name: String,
    last_name: String,
    date_of_birth: String,
    contact_number: String,
}

fn patient_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<PatientRow, rusqlite::Error> {
    Ok(PatientRow {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        date_of_birth: row.get(3)?,
        contact_number: row.get(4)?,
    })
}

fn patient_from_row(row: PatientRow, appointments: Vec<Uuid>) -> Result<Patient, DatabaseError> {
    Ok(Patient {
        id: parse_uuid(&row.id)?,
        first_name: row.first_name,
        last_name: row.last_name,
        date_of_birth: NaiveDate::parse_from_str(&row.date_of_birth, "%Y-%m-%d")
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        contact_number: row.contact_number,
        appointments,
    })
}
