//! Bounded unary calls.

use std::future::Future;
use std::time::Duration;

use tonic::{Response, Status};
use tracing::warn;

/// Run a unary backend call under `timeout`.
///
/// A backend `Status` is returned untouched. Only an elapsed timeout is
/// turned into `DEADLINE_EXCEEDED`.
pub async fn call_with_timeout<T, F>(timeout: Duration, call: F) -> Result<T, Status>
where
    F: Future<Output = Result<Response<T>, Status>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result.map(Response::into_inner),
        Err(_) => {
            warn!(?timeout, "backend call timed out");
            Err(Status::deadline_exceeded(format!(
                "backend did not answer within {}ms",
                timeout.as_millis()
            )))
        }
    }
}
