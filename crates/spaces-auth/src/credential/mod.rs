//! Bridge from a verified session to the backend's bearer credential.

pub mod bridge;
pub mod bundle;

pub use bridge::{Credential, CredentialBridge};
pub use bundle::CredentialBundle;
