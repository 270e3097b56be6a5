//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see driving ports, so they
//! stay testable with mocks.

use std::sync::Arc;

use crate::domain::ports::{LibraryService, SessionGate};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Identity resolution, login and registration.
    pub session_gate: Arc<dyn SessionGate>,
    /// Search and collection operations.
    pub library: Arc<dyn LibraryService>,
}

impl HttpState {
    /// Bundle the two driving ports.
    pub fn new(session_gate: Arc<dyn SessionGate>, library: Arc<dyn LibraryService>) -> Self {
        Self {
            session_gate,
            library,
        }
    }
}
