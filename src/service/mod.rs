//! Service layer: the ingestion pipeline and its background side effects.
//!
//! [`EventIngestor`] persists each event through an
//! [`crate::persistence::EventStore`] and then hands it to the
//! [`ContentCounterStore`] and a [`NotificationForwarder`] on supervised
//! detached tasks.

pub mod counter_store;
pub mod ingestor;
pub mod notification;
pub mod supervisor;

#[cfg(test)]
#[allow(clippy::panic)]
mod test_support;

pub use counter_store::{ContentCounterStore, CounterOutcome};
pub use ingestor::{EventIngestor, PendingSideEffects};
pub use notification::{BroadcastForwarder, NotificationError, NotificationForwarder};
pub use supervisor::spawn_supervised;
