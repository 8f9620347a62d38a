//! Routing errors.

use thiserror::Error;
use tonic::Status;

use crate::tenant::TenantId;

/// Why a request could not be routed to a tenant.
///
/// Routing errors are never retried by the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("choreo {0} not found")]
    NotFound(TenantId),

    #[error("choreo {0} not ready")]
    Unavailable(TenantId),
}

impl From<RouteError> for Status {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::NotFound(_) => Status::not_found(err.to_string()),
            RouteError::Unavailable(_) => Status::unavailable(err.to_string()),
        }
    }
}
