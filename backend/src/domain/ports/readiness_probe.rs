//! Driven port for dependency readiness checks.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// A dependency the service needs is not answering.
    pub enum ReadinessError {
        /// The dependency could not be reached.
        Unavailable { message: String } => "dependency unavailable: {message}",
    }
}

/// Cheap round trip to a backing dependency.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Succeeds when the dependency can serve requests.
    async fn check(&self) -> Result<(), ReadinessError>;
}
