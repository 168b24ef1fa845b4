//! Notification model for lifecycle event fan-out.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Severity/kind tag attached to a notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(NotificationKind::Info),
            "success" => Ok(NotificationKind::Success),
            "warning" => Ok(NotificationKind::Warning),
            "error" => Ok(NotificationKind::Error),
            _ => Err(format!("Invalid notification kind: {s}")),
        }
    }
}

impl NotificationKind {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

/// A single message delivered to one user.
///
/// Delivery is best-effort: the dispatcher logs failures and never surfaces
/// them to the workflow that triggered the notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    /// Unique identifier for the notification
    pub id: u64,

    /// Identity of the receiving user
    pub target_user: String,

    /// Short headline
    pub title: String,

    /// Message body
    pub message: String,

    /// Severity/kind tag
    #[serde(default)]
    pub kind: NotificationKind,

    /// Whether the user has seen the notification
    #[serde(default)]
    pub read: bool,

    /// Optional deep link to the affected resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Timestamp when the notification was dispatched (UTC)
    pub created_at: Timestamp,
}
