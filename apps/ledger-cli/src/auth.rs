//! # Auth Gate
//!
//! Registration and login for the single local operator.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────────────────┐   login ok    ┌────────────────────────┐        │
//! │   │ Unauthenticated  │──────────────►│ Authenticated(User)    │        │
//! │   └──────────────────┘               └────────────────────────┘        │
//! │     │   ▲    │                         (no way back; the session       │
//! │     │   │    │ register / bad login     lasts for the process)         │
//! │     │   └────┘                                                          │
//! │     │ exit                                                              │
//! │     ▼                                                                   │
//! │   [Exit]                                                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Note
//! Passwords are read without echo but stored and compared as plaintext.
//! There is no lockout, rate limiting or session expiry.

use ledger_core::User;
use ledger_db::{DbError, DbResult, UserRepository};
use tracing::info;

use crate::console::Console;
use crate::error::AppResult;

/// Where the operator stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Unauthenticated,
    Authenticated(User),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }
}

/// Result of a non-interactive registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Registered { id: i64 },
    UsernameTaken,
}

/// Registers and authenticates users against the store.
#[derive(Debug, Clone)]
pub struct AuthGate {
    users: UserRepository,
}

impl AuthGate {
    pub fn new(users: UserRepository) -> Self {
        AuthGate { users }
    }

    /// Persists a new user unless the username is taken.
    ///
    /// A name taken between the existence check and the insert is reported
    /// as `UsernameTaken` as well.
    pub async fn register_user(&self, username: &str, password: &str) -> DbResult<Registration> {
        if self.users.find_by_username(username).await?.is_some() {
            return Ok(Registration::UsernameTaken);
        }

        match self.users.insert(username, password).await {
            Ok(id) => {
                info!(user_id = id, username = %username, "User registered");
                Ok(Registration::Registered { id })
            }
            Err(DbError::DuplicateUsername { .. }) => Ok(Registration::UsernameTaken),
            Err(e) => Err(e),
        }
    }

    /// Returns the user only if both fields match exactly.
    pub async fn authenticate(&self, username: &str, password: &str) -> DbResult<Session> {
        match self.users.find_by_credentials(username, password).await? {
            Some(user) => {
                info!(user_id = user.id, "Login succeeded");
                Ok(Session::Authenticated(user))
            }
            None => {
                info!(username = %username, "Login failed");
                Ok(Session::Unauthenticated)
            }
        }
    }

    /// Interactive registration.
    ///
    /// Re-prompts while the username is taken. An empty username or closed
    /// input aborts. Returns the new user id, if any.
    pub async fn register(&self, console: &mut dyn Console) -> AppResult<Option<i64>> {
        loop {
            let Some(username) = console.read_line("Enter a username: ")? else {
                return Ok(None);
            };
            if username.is_empty() {
                console.say("Registration cancelled.")?;
                return Ok(None);
            }

            if self.users.find_by_username(&username).await?.is_some() {
                info!(username = %username, "Username already taken");
                console.say("That username already exists. Try another one.")?;
                continue;
            }

            let Some(password) = console.read_password("Enter a password: ")? else {
                return Ok(None);
            };

            match self.register_user(&username, &password).await? {
                Registration::Registered { id } => {
                    console.say("User registered successfully.")?;
                    return Ok(Some(id));
                }
                Registration::UsernameTaken => {
                    console.say("That username already exists. Try another one.")?;
                }
            }
        }
    }

    /// Interactive login. A mismatch leaves the session unauthenticated.
    pub async fn login(&self, console: &mut dyn Console) -> AppResult<Session> {
        let Some(username) = console.read_line("Username: ")? else {
            return Ok(Session::Unauthenticated);
        };
        let Some(password) = console.read_password("Password: ")? else {
            return Ok(Session::Unauthenticated);
        };

        let session = self.authenticate(&username, &password).await?;
        if session.is_authenticated() {
            console.say("Login successful.")?;
        } else {
            console.say("Incorrect username or password.")?;
        }
        Ok(session)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
