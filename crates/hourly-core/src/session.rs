use std::fmt;

use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    MissingRefreshToken,
    RefreshFailed(String),
    Logout,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRefreshToken => f.write_str("refresh token missing"),
            Self::RefreshFailed(reason) => write!(f, "refresh failed: {reason}"),
            Self::Logout => f.write_str("logout"),
        }
    }
}

/// Called after the client has cleared the token store.
///
/// The browser build redirected to the login view here; the CLI prints a hint
/// to run `hourly login`.
pub trait SessionTerminator: Send + Sync {
    fn terminate(&self, reason: &TerminationReason);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogTerminator;

impl SessionTerminator for LogTerminator {
    fn terminate(&self, reason: &TerminationReason) {
        match reason {
            TerminationReason::Logout => info!("session closed by logout"),
            other => warn!(reason = %other, "session terminated"),
        }
    }
}
