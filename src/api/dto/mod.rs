//! Data Transfer Objects for REST request/response serialization.
//!
//! All bodies use camelCase keys.

pub mod content_dto;
pub mod event_dto;

pub use content_dto::*;
pub use event_dto::*;
