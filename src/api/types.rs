//! Shared types for the HTTP API layer.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;

use crate::db::{self, DatabaseError};
use crate::notify::Notifier;

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
///
/// Holds the database location and the confirmation queue handle.
/// Each request opens its own connection via [`ApiContext::open_db`];
/// connections are never shared across requests.
#[derive(Clone)]
pub struct ApiContext {
    db_path: Arc<PathBuf>,
    notifier: Notifier,
}

impl ApiContext {
    pub fn new(db_path: PathBuf, notifier: Notifier) -> Self {
        Self {
            db_path: Arc::new(db_path),
            notifier,
        }
    }

    /// Open a fresh connection to the backing database.
    ///
    /// Pragmas and migrations are applied on every open; after the first
    /// open the migration loop is a no-op.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::open_database(self.db_path.as_ref())
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}
