//! User profile and session storage.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::utils::column_timestamp;
use crate::{
    error::{DatabaseResultExt, Result, WorkflowError},
    models::UserProfile,
};

const UPSERT_USER_SQL: &str = "INSERT INTO users (identity, display_name, role) \
     VALUES (?1, ?2, ?3) \
     ON CONFLICT(identity) DO UPDATE SET display_name = ?2, role = ?3";
const SELECT_USER_SQL: &str = "SELECT identity, display_name, role, session_token, last_activity \
     FROM users WHERE identity = ?1";
const SELECT_USERS_BY_ROLE_SQL: &str = "SELECT identity, display_name, role, session_token, \
     last_activity FROM users \
     WHERE lower(role) LIKE '%' || lower(?1) || '%' ORDER BY identity ASC";
const UPDATE_SESSION_SQL: &str = "UPDATE users SET session_token = ?1, last_activity = ?2 \
     WHERE identity = ?3";
const TOUCH_ACTIVITY_SQL: &str = "UPDATE users SET last_activity = ?1 WHERE identity = ?2";

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserProfile> {
    let last_activity = match row.get::<_, Option<String>>(4)? {
        Some(raw) => Some(column_timestamp(4, raw)?),
        None => None,
    };
    Ok(UserProfile {
        identity: row.get(0)?,
        display_name: row.get(1)?,
        role: row.get(2)?,
        session_token: row.get(3)?,
        last_activity,
    })
}

impl super::Database {
    /// Creates a user, or updates the display name and role of an existing
    /// one. Session fields are left alone on update.
    pub fn upsert_user(&mut self, identity: &str, display_name: &str, role: &str) -> Result<()> {
        self.connection
            .execute(UPSERT_USER_SQL, params![identity, display_name, role])
            .map_err(|e| WorkflowError::database_error("Failed to upsert user", e))?;
        Ok(())
    }

    /// Looks up a user by identity.
    pub fn get_user(&self, identity: &str) -> Result<UserProfile> {
        self.connection
            .prepare(SELECT_USER_SQL)
            .map_err(|e| WorkflowError::database_error("Failed to prepare query", e))?
            .query_row(params![identity], user_from_row)
            .optional()
            .map_err(|e| WorkflowError::database_error("Failed to query user", e))?
            .ok_or_else(|| WorkflowError::UserNotFound {
                identity: identity.into(),
            })
    }

    /// Finds every user whose role string contains the given role name,
    /// case-insensitively. Role strings are free text, so "Lead Supervisor"
    /// matches a lookup for "supervisor".
    pub fn list_users_by_role(&self, role: &str) -> Result<Vec<UserProfile>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_USERS_BY_ROLE_SQL)
            .map_err(|e| WorkflowError::database_error("Failed to prepare query", e))?;

        let users = stmt
            .query_map(params![role], user_from_row)
            .map_err(|e| WorkflowError::database_error("Failed to query users by role", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch users")?;
        Ok(users)
    }

    /// Installs a fresh session token and stamps activity, invalidating any
    /// session held elsewhere.
    pub fn update_session(&mut self, identity: &str, token: &str) -> Result<()> {
        let rows = self
            .connection
            .execute(
                UPDATE_SESSION_SQL,
                params![token, Timestamp::now().to_string(), identity],
            )
            .map_err(|e| WorkflowError::database_error("Failed to update session", e))?;

        if rows == 0 {
            return Err(WorkflowError::UserNotFound {
                identity: identity.into(),
            });
        }
        Ok(())
    }

    /// Stamps the user's last activity time without touching the token.
    pub fn touch_activity(&mut self, identity: &str) -> Result<()> {
        let rows = self
            .connection
            .execute(
                TOUCH_ACTIVITY_SQL,
                params![Timestamp::now().to_string(), identity],
            )
            .map_err(|e| WorkflowError::database_error("Failed to stamp activity", e))?;

        if rows == 0 {
            return Err(WorkflowError::UserNotFound {
                identity: identity.into(),
            });
        }
        Ok(())
    }
}
