//! Passive observation of session changes.

use tokio::sync::watch;

use super::gate::{decide, GateDecision};
use super::{AuthSession, AuthState};

/// A change of gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: AuthState,
    pub to: AuthState,
}

/// Folds session snapshots into gate state.
///
/// `ready` is one-shot: after the first ready snapshot the monitor never
/// returns to [`AuthState::Initializing`], even if a later snapshot reports
/// `ready = false`.
#[derive(Debug, Clone)]
pub struct GateMonitor {
    state: AuthState,
    ready_seen: bool,
}

impl Default for GateMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl GateMonitor {
    /// Start in [`AuthState::Initializing`].
    pub fn new() -> Self {
        Self {
            state: AuthState::Initializing,
            ready_seen: false,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    /// Apply a snapshot. Returns the transition if the state changed.
    pub fn observe(&mut self, session: AuthSession) -> Option<Transition> {
        self.ready_seen |= session.ready;
        let next = AuthState::from(AuthSession {
            ready: self.ready_seen,
            authenticated: session.authenticated,
        });

        if next == self.state {
            return None;
        }

        let transition = Transition {
            from: self.state,
            to: next,
        };
        tracing::debug!("Auth gate: {} -> {}", transition.from, transition.to);
        self.state = next;
        Some(transition)
    }
}

/// Follow a session channel and report a decision for `location` after
/// every change.
///
/// The current value is evaluated immediately. Runs until the sender is
/// dropped and returns the last gate state. There is no timeout: if the
/// collaborator never becomes ready the callback only ever sees
/// [`GateDecision::Loading`].
pub async fn watch_session<F>(
    mut sessions: watch::Receiver<AuthSession>,
    location: &str,
    login_route: &str,
    mut on_decision: F,
) -> AuthState
where
    F: FnMut(GateDecision),
{
    let mut monitor = GateMonitor::new();

    loop {
        let session = *sessions.borrow_and_update();
        monitor.observe(session);
        on_decision(decide(monitor.state(), location, login_route));

        if sessions.changed().await.is_err() {
            tracing::debug!("Session channel closed");
            break;
        }
    }

    monitor.state()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::NavigationState;

    #[test]
    fn test_monitor_starts_initializing() {
        let monitor = GateMonitor::new();
        assert_eq!(monitor.state(), AuthState::Initializing);
    }

    #[test]
    fn test_monitor_transitions() {
        let mut monitor = GateMonitor::new();

        assert_eq!(monitor.observe(AuthSession::new(false, false)), None);
        assert_eq!(
            monitor.observe(AuthSession::new(true, false)),
            Some(Transition {
                from: AuthState::Initializing,
                to: AuthState::Unauthenticated,
            })
        );
        assert_eq!(
            monitor.observe(AuthSession::new(true, true)),
            Some(Transition {
                from: AuthState::Unauthenticated,
                to: AuthState::Authenticated,
            })
        );
        assert_eq!(monitor.observe(AuthSession::new(true, true)), None);
        assert_eq!(
            monitor.observe(AuthSession::new(true, false)),
            Some(Transition {
                from: AuthState::Authenticated,
                to: AuthState::Unauthenticated,
            })
        );
    }

    #[test]
    fn test_monitor_ready_is_latched() {
        let mut monitor = GateMonitor::new();
        monitor.observe(AuthSession::new(true, true));

        let transition = monitor.observe(AuthSession::new(false, false));
        assert_eq!(transition.map(|t| t.to), Some(AuthState::Unauthenticated));
        assert_ne!(monitor.state(), AuthState::Initializing);
    }

    #[test]
    fn test_monitor_straight_to_authenticated() {
        let mut monitor = GateMonitor::new();
        let transition = monitor.observe(AuthSession::new(true, true));
        assert_eq!(transition.map(|t| t.from), Some(AuthState::Initializing));
        assert_eq!(monitor.state(), AuthState::Authenticated);
    }

    #[tokio::test]
    async fn test_watch_session_follows_changes() {
        let (tx, rx) = watch::channel(AuthSession::default());

        let handle = tokio::spawn(async move {
            let mut decisions = Vec::new();
            let last = watch_session(rx, "/dashboard", "/login", |d| decisions.push(d)).await;
            (last, decisions)
        });

        tx.send(AuthSession::new(true, false)).unwrap();
        tokio::task::yield_now().await;
        tx.send(AuthSession::new(true, true)).unwrap();
        drop(tx);

        let (last, decisions) = handle.await.unwrap();
        assert_eq!(last, AuthState::Authenticated);
        assert_eq!(decisions.last(), Some(&GateDecision::Render));
        // Protected content never shows before the session is confirmed
        let first_render = decisions.iter().position(|d| d.is_render()).unwrap();
        assert!(decisions[..first_render]
            .iter()
            .all(|d| matches!(d, GateDecision::Loading | GateDecision::Redirect { .. })));
    }

    #[tokio::test]
    async fn test_watch_session_never_ready() {
        let (tx, rx) = watch::channel(AuthSession::default());
        drop(tx);

        let mut decisions = Vec::new();
        let last = watch_session(rx, "/dashboard", "/login", |d| decisions.push(d)).await;

        assert_eq!(last, AuthState::Initializing);
        assert_eq!(decisions, vec![GateDecision::Loading]);
    }

    #[tokio::test]
    async fn test_watch_session_redirect_keeps_origin() {
        let (tx, rx) = watch::channel(AuthSession::new(true, false));
        drop(tx);

        let mut decisions = Vec::new();
        watch_session(rx, "/risk/reports", "/login", |d| decisions.push(d)).await;

        assert_eq!(
            decisions,
            vec![GateDecision::Redirect {
                to: "/login".to_string(),
                state: NavigationState {
                    from: "/risk/reports".to_string(),
                },
                replace: true,
            }]
        );
    }
}
