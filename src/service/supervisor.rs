//! Supervised detached tasks.
//!
//! [`spawn_supervised`] runs a fallible future on its own task and watches
//! it from a second task. Errors and panics stop at that boundary: they are
//! logged and never reach whoever scheduled the work.

use std::fmt::Display;
use std::future::Future;

use tokio::task::JoinHandle;

/// Spawns `work` as a detached task with an error and panic boundary.
///
/// The returned handle resolves once `work` has finished and its outcome
/// has been logged. Dropping the handle does not cancel anything.
pub fn spawn_supervised<F, T, E>(task: &'static str, work: F) -> JoinHandle<()>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
{
    let inner = tokio::spawn(work);
    tokio::spawn(async move {
        match inner.await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => tracing::warn!(task, error = %e, "detached task failed"),
            Err(join_err) if join_err.is_panic() => {
                tracing::error!(task, "detached task panicked");
            }
            Err(_) => tracing::debug!(task, "detached task cancelled"),
        }
    })
}
