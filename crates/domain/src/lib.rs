//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod permission;
pub mod resolver;
mod role;

pub use permission::Permission;
pub use role::{EntityStatus, Role};
