//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the validation pipeline and the stores.

pub mod auth;

pub use auth::AuthService;
