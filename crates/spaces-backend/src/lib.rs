//! # spaces-backend
//!
//! Client for the backend service that owns spaces, files, members, and
//! activity. Every call carries the caller's bearer credential; every
//! non-success reply is captured verbatim so the gateway can relay it.

pub mod client;
pub mod form;
pub mod reply;

pub use client::{BackendBody, BackendClient};
pub use form::FormField;
pub use reply::{BinaryReply, ByteStream, JsonReply};
