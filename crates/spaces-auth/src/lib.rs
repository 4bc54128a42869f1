//! # spaces-auth
//!
//! Session handling for the Spaces gateway.
//!
//! ## Modules
//!
//! - `session` — verification and issuance of the signed session cookie
//! - `credential` — the bridge from a verified session to the bearer
//!   credential the backend expects

pub mod credential;
pub mod session;

pub use credential::{Credential, CredentialBridge, CredentialBundle};
pub use session::{IssuedSession, SessionClaims, SessionDecoder, SessionIssuer, SessionUser};
