use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered patient.
///
/// `appointments` is the derived index of owned appointment ids. It is never
/// stored; reads recompute it from the appointments table, ordered by
/// appointment date-time then id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub contact_number: String,
    pub appointments: Vec<Uuid>,
}

/// Incoming create/update body for a patient.
///
/// Every field is optional so validation can report all missing and invalid
/// fields in one response instead of failing on the first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub contact_number: Option<String>,
}

/// Validated scalar fields of a patient, shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientFields {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub contact_number: String,
}
