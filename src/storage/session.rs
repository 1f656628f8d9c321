//! Session persistence and credential handling
//!
//! The bearer token and the signed-in user's display details live in the
//! local store under two fixed keys. Passwords are only ever held in a
//! [`Password`], which wipes its buffer on drop.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::local_store::LocalStore;
use crate::error::FinboardResult;

pub const TOKEN_KEY: &str = "authToken";
pub const USER_KEY: &str = "currentUser";

/// A password that is zeroed when dropped and never printed
pub struct Password(Zeroizing<String>);

impl Password {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password").field("len", &self.0.len()).finish()
    }
}

/// Who is signed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
}

impl SessionUser {
    /// First name when known, else the username
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// A signed-in session
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    store: LocalStore,
}

impl SessionStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// The saved session, if both keys are present and readable
    pub fn load(&self) -> Option<Session> {
        let token = match self.store.get::<String>(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return None,
            Err(e) => {
                warn!(error = %e, "Could not read saved session");
                return None;
            }
        };

        match self.store.get::<SessionUser>(USER_KEY) {
            Ok(Some(user)) => Some(Session { token, user }),
            Ok(None) => {
                debug!("Token saved without a user, ignoring it");
                None
            }
            Err(e) => {
                warn!(error = %e, "Saved user is malformed");
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> FinboardResult<()> {
        self.store.set_many(&[
            (TOKEN_KEY, Value::String(session.token.clone())),
            (USER_KEY, serde_json::to_value(&session.user)?),
        ])
    }

    pub fn clear(&self) -> FinboardResult<()> {
        self.store.remove(&[TOKEN_KEY, USER_KEY])
    }
}
