use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Role;
use crate::store::Store;

/// Store key holding the serialized session.
const SESSION_KEY: &str = "user";

/// The three demo accounts. Username and password coincide by construction.
const CREDENTIALS: [(&str, &str, Role); 3] = [
    ("admin", "admin", Role::Admin),
    ("teacher", "teacher", Role::Teacher),
    ("student", "student", Role::Student),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid credentials")]
pub struct InvalidCredentials;

/// Holder of the at-most-one authenticated identity. Constructed from the
/// store so tests can build isolated gates; callers persist after every
/// change so the stored session is always current.
#[derive(Default)]
pub struct SessionGate {
    current: Option<Session>,
}

impl SessionGate {
    /// Restore from the store. Absent or malformed data yields logged-out;
    /// the stale entry is overwritten by the next session change.
    pub fn restore(store: &Store) -> SessionGate {
        let current = match store.get(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!(error = %e, "stored session is malformed, starting logged out");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "session read failed, starting logged out");
                None
            }
        };
        SessionGate { current }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Exact match against the credential table. Failure leaves any prior
    /// session untouched.
    pub fn login(&mut self, username: &str, password: &str) -> Result<&Session, InvalidCredentials> {
        for (user, pass, role) in CREDENTIALS {
            if username == user && password == pass {
                return Ok(self.current.insert(Session {
                    username: user.to_string(),
                    role,
                }));
            }
        }
        Err(InvalidCredentials)
    }

    pub fn logout(&mut self) {
        self.current = None;
    }

    /// `None` means the caller redirects to the login entry point: absent
    /// session and wrong role are both routing decisions, not faults.
    pub fn authorize(&self, required: Role) -> Option<&Session> {
        self.current.as_ref().filter(|s| s.role == required)
    }

    /// Mirror the session to the store: logged-in writes the session under
    /// the fixed key, logged-out deletes the entry outright.
    pub fn persist(&self, store: &Store) -> anyhow::Result<()> {
        match &self.current {
            Some(session) => {
                let raw = serde_json::to_string(session)?;
                store.set(SESSION_KEY, &raw)
            }
            None => store.remove(SESSION_KEY),
        }
    }
}
