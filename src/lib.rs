//! # content-events
//!
//! Ingestion pipeline for content-interaction events (views, clicks,
//! playback, completion).
//!
//! Each event is classified by client device and durably appended to the
//! event log. Only then are the per-item engagement counters updated and a
//! real-time action signal pushed, both on supervised background tasks
//! whose failures never reach the caller.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── EventIngestor (service/)
//!     │     ├── classify()            inline
//!     │     ├── EventStore::append    awaited
//!     │     ├── ContentCounterStore   detached
//!     │     └── NotificationForwarder detached ──► ActionBus ──► WS
//!     │
//!     └── PostgreSQL / in-memory persistence (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;
