//! Email/password accounts and the signed-in session.
//!
//! - **Directory**: SQLite table of accounts, passwords stored as salted SHA-256
//! - **Session**: the current user, with a `tokio::sync::watch` channel for
//!   auth-state changes

mod directory;
mod session;
mod types;

pub use directory::{
    validate_sign_up, UserDirectory, MIN_PASSWORD_LEN, MSG_BAD_CREDENTIALS, MSG_EMAIL_IN_USE,
    MSG_INVALID_EMAIL, MSG_MISSING_FIELDS, MSG_PASSWORD_MISMATCH, MSG_WEAK_PASSWORD,
};
pub use session::AuthSession;
pub use types::{SignInRequest, SignUpRequest, User, ANONYMOUS};
