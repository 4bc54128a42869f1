//! Session cookie verification and issuance.

pub mod claims;
pub mod decoder;
pub mod issuer;
pub mod user;

pub use claims::SessionClaims;
pub use decoder::SessionDecoder;
pub use issuer::{IssuedSession, SessionIssuer};
pub use user::SessionUser;
