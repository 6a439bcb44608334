pub mod appointment;
pub mod enums;
pub mod filters;
pub mod patient;

pub use appointment::{Appointment, AppointmentFields, AppointmentPayload};
pub use enums::AppointmentStatus;
pub use filters::AppointmentFilter;
pub use patient::{Patient, PatientFields, PatientPayload};
