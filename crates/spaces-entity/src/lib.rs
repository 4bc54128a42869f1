//! # spaces-entity
//!
//! Wire models for the Spaces gateway. The backend is the system of record
//! for every one of these; the gateway and the view layer only hold
//! transient copies. JSON field names are camelCase and unknown fields are
//! ignored so backend additions never break decoding.

pub mod activity;
pub mod endpoints;
pub mod file;
pub mod id;
pub mod member;
pub mod space;
pub mod timestamp;

pub use activity::Activity;
pub use file::SpaceFile;
pub use id::{ActivityId, FileId, SpaceId};
pub use member::{Member, MemberRole, NewMember, RoleChange};
pub use space::{NewSpace, Space, SpaceUpdate};
