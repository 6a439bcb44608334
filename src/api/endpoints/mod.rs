//! API endpoint handlers.
//!
//! One module per resource. Handlers stay thin: parse the request,
//! call the matching service function, map the outcome to a response.

pub mod appointments;
pub mod health;
pub mod patients;

use uuid::Uuid;

use crate::api::error::ApiError;

/// Parse a path segment as an entity id.
///
/// A malformed id can never name an existing record, so it is reported
/// the same way as an unknown one: 404 with an empty body.
pub(crate) fn parse_id(raw: &str, entity: &'static str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .map_err(|_| ApiError::NotFound(format!("{entity} id {raw:?} is not a valid id")))
}
