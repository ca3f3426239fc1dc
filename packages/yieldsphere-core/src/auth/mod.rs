//! Dashboard access control.
//!
//! The wallet-login SDK owns the session. The gate only reads two flags from
//! it (`ready`, `authenticated`) and turns them into a render decision for a
//! requested location.

mod gate;
mod monitor;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

pub use gate::{decide, AuthGate, GateDecision, NavigationState};
pub use monitor::{watch_session, GateMonitor, Transition};

/// Session flags reported by the authentication collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// The SDK has finished initializing
    pub ready: bool,
    /// A user is logged in
    pub authenticated: bool,
}

impl AuthSession {
    pub fn new(ready: bool, authenticated: bool) -> Self {
        Self {
            ready,
            authenticated,
        }
    }
}

/// Gate state derived from an [`AuthSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthState {
    Initializing,
    Unauthenticated,
    Authenticated,
}

impl From<AuthSession> for AuthState {
    fn from(session: AuthSession) -> Self {
        match (session.ready, session.authenticated) {
            (false, _) => AuthState::Initializing,
            (true, false) => AuthState::Unauthenticated,
            (true, true) => AuthState::Authenticated,
        }
    }
}

impl std::fmt::Display for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthState::Initializing => write!(f, "initializing"),
            AuthState::Unauthenticated => write!(f, "unauthenticated"),
            AuthState::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// External authentication collaborator (wallet-login SDK).
///
/// The gate reads [`session`](Self::session) and never mutates it. `login`
/// and `logout` drive the SDK's own flows and resolve once they complete.
#[async_trait]
pub trait AuthSessionProvider: Send + Sync {
    /// Current session flags.
    fn session(&self) -> AuthSession;

    /// Run the login flow.
    async fn login(&self) -> Result<()>;

    /// End the current session.
    async fn logout(&self) -> Result<()>;
}

#[async_trait]
impl<P: AuthSessionProvider + ?Sized> AuthSessionProvider for Arc<P> {
    fn session(&self) -> AuthSession {
        (**self).session()
    }

    async fn login(&self) -> Result<()> {
        (**self).login().await
    }

    async fn logout(&self) -> Result<()> {
        (**self).logout().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_session() {
        assert_eq!(
            AuthState::from(AuthSession::new(false, false)),
            AuthState::Initializing
        );
        // Not ready wins over a stale authenticated flag
        assert_eq!(
            AuthState::from(AuthSession::new(false, true)),
            AuthState::Initializing
        );
        assert_eq!(
            AuthState::from(AuthSession::new(true, false)),
            AuthState::Unauthenticated
        );
        assert_eq!(
            AuthState::from(AuthSession::new(true, true)),
            AuthState::Authenticated
        );
    }

    #[test]
    fn test_state_display() {
        assert_eq!(AuthState::Initializing.to_string(), "initializing");
        assert_eq!(
            serde_json::to_string(&AuthState::Authenticated).unwrap(),
            "\"authenticated\""
        );
    }
}
