//! Session context shared by the auth gate, the navigation shell and every panel.
//!
//! The bearer token is held in memory only. It is written once on login and
//! cleared wholesale on logout; panels only read it.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SuperAgentError};

/// Opaque session credential attached to authorized dashboard requests.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<BearerToken>,
    /// Incremented on every login and logout.
    generation: u64,
}

/// Cloneable handle to the single in-memory session.
///
/// Every clone observes the same token. Panels use [`SessionContext::generation`]
/// as the "token changed" dependency that triggers a refetch.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    state: Arc<RwLock<SessionState>>,
}

impl SessionContext {
    /// Creates an unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a freshly issued token, replacing any previous one.
    pub fn authenticate(&self, token: BearerToken) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.token = Some(token);
        state.generation += 1;
    }

    /// Drops the token. This is the only way a session ends.
    pub fn invalidate(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.token.take().is_some() {
            state.generation += 1;
        }
    }

    pub fn token(&self) -> Option<BearerToken> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
    }

    /// Returns the token or [`SuperAgentError::Unauthenticated`].
    pub fn require_token(&self) -> Result<BearerToken> {
        self.token().ok_or(SuperAgentError::Unauthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .is_some()
    }

    pub fn generation(&self) -> u64 {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generation
    }
}
