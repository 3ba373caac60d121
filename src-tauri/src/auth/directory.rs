use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rand::distr::Alphanumeric;
use rand::Rng;
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::error::EcoConnectError;

use super::types::{SignInRequest, SignUpRequest, User};

pub const MSG_MISSING_FIELDS: &str = "Please fill in all fields.";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match.";
pub const MSG_WEAK_PASSWORD: &str = "Password should be at least 6 characters.";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const MSG_EMAIL_IN_USE: &str = "This email is already in use.";
pub const MSG_BAD_CREDENTIALS: &str = "Invalid email or password.";

pub const MIN_PASSWORD_LEN: usize = 6;

const SALT_LEN: usize = 16;
const UID_LEN: usize = 28;

fn random_token(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check the sign-up form, in the order the form reports problems.
pub fn validate_sign_up(req: &SignUpRequest) -> Result<(), EcoConnectError> {
    let fields = [&req.name, &req.email, &req.password, &req.confirm_password];
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(EcoConnectError::Validation(MSG_MISSING_FIELDS.to_string()));
    }
    if req.password != req.confirm_password {
        return Err(EcoConnectError::Validation(MSG_PASSWORD_MISMATCH.to_string()));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(EcoConnectError::Auth(MSG_WEAK_PASSWORD.to_string()));
    }
    let email = req.email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(EcoConnectError::Auth(MSG_INVALID_EMAIL.to_string())),
    }
}

/// Local account database with salted SHA-256 password hashes.
pub struct UserDirectory {
    conn: Mutex<Connection>,
}

impl UserDirectory {
    /// Create or open the account database at the given path.
    pub fn open(db_path: &Path) -> Result<Self, EcoConnectError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| EcoConnectError::Store(format!("Failed to create data dir: {}", e)))?;
        }
        let directory = Self::with_connection(Connection::open(db_path)?)?;
        info!("Opened user directory at {:?}", db_path);
        Ok(directory)
    }

    pub fn in_memory() -> Result<Self, EcoConnectError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, EcoConnectError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                uid TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                display_name TEXT,
                password_salt TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>, EcoConnectError> {
        self.conn
            .lock()
            .map_err(|_| EcoConnectError::Store("user directory lock poisoned".to_string()))
    }

    /// Register a new account and return it.
    pub fn sign_up(&self, req: &SignUpRequest) -> Result<User, EcoConnectError> {
        validate_sign_up(req)?;

        let email = normalize_email(&req.email);
        let display_name = req.name.trim().to_string();
        let uid = random_token(UID_LEN);
        let salt = random_token(SALT_LEN);
        let hash = hash_password(&salt, &req.password);

        let conn = self.conn()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
            params![email],
            |row| row.get(0),
        )?;
        if exists {
            warn!("Sign-up rejected, email already registered");
            return Err(EcoConnectError::Auth(MSG_EMAIL_IN_USE.to_string()));
        }

        conn.execute(
            "INSERT INTO users (uid, email, display_name, password_salt, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![uid, email, display_name, salt, hash, Utc::now().to_rfc3339()],
        )?;

        info!("Registered user {}", uid);
        Ok(User {
            uid,
            email,
            display_name: Some(display_name),
        })
    }

    /// Check credentials. Unknown email and wrong password fail the same way.
    pub fn sign_in(&self, req: &SignInRequest) -> Result<User, EcoConnectError> {
        if req.email.trim().is_empty() || req.password.is_empty() {
            return Err(EcoConnectError::Validation(MSG_MISSING_FIELDS.to_string()));
        }

        let email = normalize_email(&req.email);
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT uid, email, display_name, password_salt, password_hash
                 FROM users WHERE email = ?1",
                params![email],
                |row| {
                    Ok((
                        User {
                            uid: row.get(0)?,
                            email: row.get(1)?,
                            display_name: row.get(2)?,
                        },
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((user, salt, hash)) if hash_password(&salt, &req.password) == hash => {
                info!("User {} signed in", user.uid);
                Ok(user)
            }
            _ => {
                warn!("Sign-in failed");
                Err(EcoConnectError::Auth(MSG_BAD_CREDENTIALS.to_string()))
            }
        }
    }

    pub fn get(&self, uid: &str) -> Result<Option<User>, EcoConnectError> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT uid, email, display_name FROM users WHERE uid = ?1",
                params![uid],
                |row| {
                    Ok(User {
                        uid: row.get(0)?,
                        email: row.get(1)?,
                        display_name: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }
}
