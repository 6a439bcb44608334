//! Domain services: validate first, then touch the store.
//!
//! Handlers call these; nothing here knows about HTTP.

pub mod appointments;
pub mod patients;

use thiserror::Error;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::validation::ValidationErrors;

/// Outcome of a service operation, consumed by the request handlers.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Invalid(ValidationErrors),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Invalid(errors)
    }
}

// Lets services run their own transactions without a map_err at every step.
impl From<rusqlite::Error> for ServiceError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(DatabaseError::Sqlite(err))
    }
}

impl ServiceError {
    fn patient_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: "patient",
            id,
        }
    }

    fn appointment_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: "appointment",
            id,
        }
    }
}
