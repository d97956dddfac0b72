//! HTTP handlers, one module per resource.

pub mod games;
pub mod idp;
pub mod roles;
pub mod secrets;
pub mod tenant;
pub mod user;
pub mod users;
