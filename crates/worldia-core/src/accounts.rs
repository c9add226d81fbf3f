//! User accounts and cookie sessions.
//!
//! Accounts live in memory for the lifetime of the process. Passwords are
//! stored as salted SHA-256 digests; sessions are random tokens that expire
//! after [`SessionConfig::LIFETIME`].

use crate::config::SessionConfig;
use crate::error::{Result, WorldiaError};
use chrono::{DateTime, Utc};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// User as exposed over the API (no credentials).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: String,
}

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: PublicUser,
    pub expires_at: DateTime<Utc>,
}

struct Account {
    user: PublicUser,
    salt: String,
    password_hash: String,
}

struct SessionEntry {
    email: String,
    expires_at: DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    /// Keyed by lower-cased email.
    accounts: HashMap<String, Account>,
    sessions: HashMap<String, SessionEntry>,
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn new_salt() -> String {
    let mut salt = [0u8; 16];
    rand::rng().fill(&mut salt);
    hex::encode(salt)
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WorldiaError::validation(field, "All fields are required"));
    }
    Ok(trimmed)
}

/// Registered users and their sessions.
pub struct AccountStore {
    inner: RwLock<Inner>,
    session_lifetime: Duration,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::with_session_lifetime(SessionConfig::LIFETIME)
    }

    pub fn with_session_lifetime(session_lifetime: Duration) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            session_lifetime,
        }
    }

    fn start_session(&self, inner: &mut Inner, user: &PublicUser) -> Session {
        let now = Utc::now();
        let before = inner.sessions.len();
        inner.sessions.retain(|_, entry| entry.expires_at > now);
        if inner.sessions.len() < before {
            debug!("Pruned {} expired sessions", before - inner.sessions.len());
        }

        let token = Uuid::new_v4().to_string();
        let lifetime = chrono::Duration::from_std(self.session_lifetime)
            .unwrap_or_else(|_| chrono::Duration::days(30));
        let expires_at = now + lifetime;
        inner.sessions.insert(
            token.clone(),
            SessionEntry {
                email: user.email.clone(),
                expires_at,
            },
        );
        Session {
            token,
            user: user.clone(),
            expires_at,
        }
    }

    /// Create an account and log it in.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        let name = required("name", name)?;
        let email = required("email", email)?.to_lowercase();
        if password.is_empty() {
            return Err(WorldiaError::validation("password", "All fields are required"));
        }
        if !EMAIL_RE.is_match(&email) {
            return Err(WorldiaError::validation("email", "Invalid email address"));
        }

        let mut inner = self.inner.write().await;
        if inner.accounts.contains_key(&email) {
            return Err(WorldiaError::EmailTaken);
        }

        let salt = new_salt();
        let user = PublicUser {
            id: format!("user_{}", Uuid::new_v4().simple()),
            email: email.clone(),
            name: name.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        inner.accounts.insert(
            email,
            Account {
                user: user.clone(),
                password_hash: hash_password(&salt, password),
                salt,
            },
        );
        info!("Registered user {}", user.id);

        Ok(self.start_session(&mut inner, &user))
    }

    /// Verify credentials and open a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(WorldiaError::validation(
                "email",
                "Email and password are required",
            ));
        }
        let email = email.trim().to_lowercase();

        let mut inner = self.inner.write().await;
        let user = match inner.accounts.get(&email) {
            Some(account) if hash_password(&account.salt, password) == account.password_hash => {
                account.user.clone()
            }
            _ => {
                debug!("Rejected login for {}", email);
                return Err(WorldiaError::InvalidCredentials);
            }
        };

        Ok(self.start_session(&mut inner, &user))
    }

    /// Resolve a session token. Expired sessions are dropped.
    pub async fn user_for_session(&self, token: &str) -> Option<PublicUser> {
        {
            let inner = self.inner.read().await;
            let entry = inner.sessions.get(token)?;
            if entry.expires_at > Utc::now() {
                return inner.accounts.get(&entry.email).map(|a| a.user.clone());
            }
        }

        debug!("Session expired");
        self.inner.write().await.sessions.remove(token);
        None
    }

    /// Forget a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) {
        self.inner.write().await.sessions.remove(token);
    }

    pub async fn user_count(&self) -> usize {
        self.inner.read().await.accounts.len()
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}
