//! WebSocket layer: real-time delivery of action signals.
//!
//! The endpoint at `/ws` lets subscribers pick the action types they care
//! about and streams matching signals as they are ingested.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
