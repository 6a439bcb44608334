use uuid::Uuid;

use super::enums::AppointmentStatus;

#[derive(Debug, Default)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub patient_id: Option<Uuid>,
}
