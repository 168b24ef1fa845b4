//! Notification storage. Dispatch fan-out lives in the workflow layer; this
//! module only persists and lists rows.

use jiff::Timestamp;
use rusqlite::params;

use super::utils::{column_enum, column_timestamp};
use crate::{
    error::{DatabaseResultExt, Result, WorkflowError},
    models::{Notification, NotificationKind},
};

const INSERT_NOTIFICATION_SQL: &str = "INSERT INTO notifications \
     (target_user, title, message, kind, read, link, created_at) \
     VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6)";
const SELECT_NOTIFICATIONS_SQL: &str = "SELECT id, target_user, title, message, kind, read, \
     link, created_at FROM notifications WHERE target_user = ?1 \
     ORDER BY created_at DESC, id DESC";
const SELECT_UNREAD_SQL: &str = "SELECT id, target_user, title, message, kind, read, \
     link, created_at FROM notifications \
     WHERE target_user = ?1 AND read = 0 ORDER BY created_at DESC, id DESC";
const MARK_READ_SQL: &str = "UPDATE notifications SET read = 1 WHERE id = ?1";

fn notification_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Notification> {
    Ok(Notification {
        id: row.get::<_, i64>(0)? as u64,
        target_user: row.get(1)?,
        title: row.get(2)?,
        message: row.get(3)?,
        kind: column_enum::<NotificationKind>(4, row.get(4)?)?,
        read: row.get(5)?,
        link: row.get(6)?,
        created_at: column_timestamp(7, row.get(7)?)?,
    })
}

impl super::Database {
    /// Persists a notification addressed to a single user.
    pub fn insert_notification(
        &mut self,
        target_user: &str,
        title: &str,
        message: &str,
        kind: NotificationKind,
        link: Option<&str>,
    ) -> Result<Notification> {
        let now = Timestamp::now();
        self.connection
            .execute(
                INSERT_NOTIFICATION_SQL,
                params![target_user, title, message, kind.as_str(), link, now.to_string()],
            )
            .map_err(|e| WorkflowError::database_error("Failed to insert notification", e))?;

        Ok(Notification {
            id: self.connection.last_insert_rowid() as u64,
            target_user: target_user.into(),
            title: title.into(),
            message: message.into(),
            kind,
            read: false,
            link: link.map(Into::into),
            created_at: now,
        })
    }

    /// Lists a user's notifications, newest first.
    pub fn list_notifications(
        &self,
        target_user: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>> {
        let sql = if unread_only {
            SELECT_UNREAD_SQL
        } else {
            SELECT_NOTIFICATIONS_SQL
        };
        let mut stmt = self
            .connection
            .prepare(sql)
            .map_err(|e| WorkflowError::database_error("Failed to prepare query", e))?;

        let notifications = stmt
            .query_map(params![target_user], notification_from_row)
            .map_err(|e| WorkflowError::database_error("Failed to query notifications", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch notifications")?;
        Ok(notifications)
    }

    /// Marks a single notification as read.
    pub fn mark_notification_read(&mut self, id: u64) -> Result<()> {
        let rows = self
            .connection
            .execute(MARK_READ_SQL, params![id as i64])
            .map_err(|e| WorkflowError::database_error("Failed to mark notification read", e))?;

        if rows == 0 {
            return Err(WorkflowError::invalid_input("notification")
                .with_reason(format!("Notification with ID {id} not found")));
        }
        Ok(())
    }
}
