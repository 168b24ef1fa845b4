//! User profile model backing role fan-out and the session guard.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A user account known to the system.
///
/// `role` is stored as free text on purpose: legacy data carries values such
/// as "Senior Supervisor", and role fan-out matches by case-insensitive
/// containment rather than equality.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Stable identity string (username or email)
    pub identity: String,

    /// Human-readable display name
    pub display_name: String,

    /// Role field, matched case-insensitively for fan-out
    pub role: String,

    /// Token of the single active session, rotated on every login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,

    /// Timestamp of the user's last recorded activity (UTC)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<Timestamp>,
}
