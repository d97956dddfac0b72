//! Request-scoped services behind the handlers.

pub mod games;
pub mod roles;
