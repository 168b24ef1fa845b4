//! Client session validity checks.
//!
//! A session dies two ways: the same identity logs in somewhere else and
//! rotates the stored token, or the user goes quiet past the inactivity
//! window. The guard itself is a pure decision over a stored profile; login
//! and activity stamping go through [`crate::Workflow`].

use jiff::{SignedDuration, Timestamp};

use crate::models::UserProfile;

/// Inactivity window after which a session is considered expired.
pub const SESSION_TIMEOUT: SignedDuration = SignedDuration::from_mins(15);

/// Outcome of checking a client's session against the stored profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionVerdict {
    /// The session is valid and may continue.
    Active,
    /// The user has been inactive past [`SESSION_TIMEOUT`].
    ExpiredInactive,
    /// A newer login rotated the stored token; this client holds a stale one.
    SupersededElsewhere,
}

/// Stateless evaluator for session validity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionGuard;

impl SessionGuard {
    /// Compares the client's cached token and the clock against the stored
    /// profile.
    ///
    /// A token mismatch wins over inactivity: a superseded client is told so
    /// even when it has also idled out, since "logged in elsewhere" is the
    /// actionable message.
    pub fn evaluate(
        &self,
        profile: &UserProfile,
        cached_token: &str,
        now: Timestamp,
    ) -> SessionVerdict {
        match profile.session_token.as_deref() {
            Some(stored) if stored == cached_token => {}
            _ => return SessionVerdict::SupersededElsewhere,
        }

        match profile.last_activity {
            Some(last) if now.duration_since(last) <= SESSION_TIMEOUT => SessionVerdict::Active,
            _ => SessionVerdict::ExpiredInactive,
        }
    }
}
