//! Route guard for protected dashboard views.

use serde::{Deserialize, Serialize};

use super::{AuthSessionProvider, AuthState};
use crate::routes;
use crate::Result;

/// Navigation state carried through a login redirect so the login page can
/// send the user back afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Originally requested location
    pub from: String,
}

/// What the guarded route should do for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GateDecision {
    /// Session not ready yet: show a loading indicator, nothing else.
    Loading,
    /// Not logged in: navigate to the login route.
    Redirect {
        to: String,
        state: NavigationState,
        /// Replace the current history entry instead of pushing
        replace: bool,
    },
    /// Logged in: render the protected content unchanged.
    Render,
}

impl GateDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, GateDecision::Render)
    }
}

/// Map a gate state to a decision for `location`.
pub fn decide(state: AuthState, location: &str, login_route: &str) -> GateDecision {
    match state {
        AuthState::Initializing => GateDecision::Loading,
        AuthState::Unauthenticated => GateDecision::Redirect {
            to: login_route.to_string(),
            state: NavigationState {
                from: location.to_string(),
            },
            replace: true,
        },
        AuthState::Authenticated => GateDecision::Render,
    }
}

/// Auth gate bound to an injected session provider.
#[derive(Debug)]
pub struct AuthGate<P> {
    provider: P,
    login_route: String,
}

impl<P: AuthSessionProvider> AuthGate<P> {
    /// Create a gate that redirects to `/login`.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            login_route: routes::LOGIN.to_string(),
        }
    }

    /// Use a different login route.
    pub fn with_login_route(mut self, login_route: impl Into<String>) -> Self {
        self.login_route = login_route.into();
        self
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// Current gate state read from the provider.
    pub fn state(&self) -> AuthState {
        AuthState::from(self.provider.session())
    }

    /// Decide what to render for `location`.
    ///
    /// Pure in the provider's current flags: calling it again without a
    /// session change returns the same decision.
    pub fn evaluate(&self, location: &str) -> GateDecision {
        let state = self.state();
        let decision = decide(state, location, &self.login_route);
        tracing::trace!(%state, location, ?decision, "Auth gate evaluated");
        decision
    }

    /// Run the provider's login flow, logging and propagating a failure.
    pub async fn login(&self) -> Result<()> {
        match self.provider.login().await {
            Ok(()) => {
                tracing::debug!("Login completed");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Login failed: {}", e);
                Err(e)
            }
        }
    }

    /// End the session through the provider.
    pub async fn logout(&self) -> Result<()> {
        self.provider.logout().await?;
        tracing::debug!("Logged out");
        Ok(())
    }
}
