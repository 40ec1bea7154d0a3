//! Domain layer: event records, counters, device classification, and the
//! action signal bus.

pub mod action_bus;
pub mod content_counter;
pub mod device;
pub mod event_id;
pub mod event_record;
pub mod kinds;

pub use action_bus::{ActionBus, ActionSignal};
pub use content_counter::{ContentCounter, CounterField};
pub use device::classify;
pub use event_id::EventId;
pub use event_record::{EventDraft, EventRecord, Metadata, TrackEventInput};
pub use kinds::{ActionType, ContentKind, DeviceType};
