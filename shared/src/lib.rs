//! Gatehouse Shared Library
//!
//! This crate contains the wire contract for the authentication API
//! (request/response types) and the pure credential validation rules,
//! usable by the backend and by any client of the service.

pub mod types;
pub mod validation;

// Re-export commonly used items
pub use types::*;
