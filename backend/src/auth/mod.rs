//! Authentication module
//!
//! Provides cookie-session authentication with bcrypt password hashing and
//! the ordered credential validation pipeline.

mod password;
mod session;
pub mod validate;

pub use password::{PasswordService, DEFAULT_BCRYPT_COST};
pub use session::{CurrentSession, SessionManager};
