//! Admin login and bearer tokens.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// The single admin identity.
#[derive(Clone, Debug)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// How long an issued token stays valid.
pub const TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Issued bearer tokens. A token lives until logout, expiry or restart.
#[derive(Debug)]
pub struct TokenStore {
    tokens: RwLock<HashMap<String, Instant>>,
    ttl: Duration,
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::with_ttl(TOKEN_TTL)
    }
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            tokens: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Issue a fresh random token. Expired tokens are dropped on the way.
    pub fn issue(&self) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let now = Instant::now();
        let mut tokens = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        tokens.retain(|_, issued| now.duration_since(*issued) < self.ttl);
        tokens.insert(token.clone(), now);
        token
    }

    pub fn is_valid(&self, token: &str) -> bool {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .is_some_and(|issued| issued.elapsed() < self.ttl)
    }

    /// Returns true if the token was known.
    pub fn revoke(&self, token: &str) -> bool {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token)
            .is_some()
    }

    /// Number of tokens currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.tokens.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
