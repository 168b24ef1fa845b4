//! Notification dispatch and user management.
//!
//! Direct dispatch methods return errors to the caller. Workflow side effects
//! (status changes, reschedule decisions) go through the best-effort variants
//! instead: a failed notification is logged and swallowed so it can never
//! fail the state change that triggered it.

use jiff::Timestamp;
use tokio::task;
use uuid::Uuid;

use super::Workflow;
use crate::{
    db::Database,
    error::{Result, WorkflowError},
    events::StoreEvent,
    models::{Notification, NotificationKind, UserProfile},
    params::{AddUser, Id, ListNotifications},
    session::{SessionGuard, SessionVerdict},
};

impl Workflow {
    /// Delivers a notification to a single user's inbox.
    pub async fn notify_user(
        &self,
        target: &str,
        title: &str,
        message: &str,
        kind: NotificationKind,
        link: Option<&str>,
    ) -> Result<Notification> {
        let db_path = self.db_path.clone();
        let target = target.to_string();
        let title = title.to_string();
        let message = message.to_string();
        let link = link.map(String::from);

        let notification = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.insert_notification(&target, &title, &message, kind, link.as_deref())
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        self.feed.publish(StoreEvent::NotificationAdded {
            target: notification.target_user.clone(),
        });
        Ok(notification)
    }

    /// Delivers a notification to every user whose role string contains the
    /// given role name. Matching nobody is not an error; the result is simply
    /// empty.
    pub async fn notify_role(
        &self,
        role: &str,
        title: &str,
        message: &str,
        kind: NotificationKind,
        link: Option<&str>,
    ) -> Result<Vec<Notification>> {
        let db_path = self.db_path.clone();
        let role = role.to_string();
        let title = title.to_string();
        let message = message.to_string();
        let link = link.map(String::from);

        let notifications = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let users = db.list_users_by_role(&role)?;
            let mut delivered = Vec::with_capacity(users.len());
            for user in &users {
                delivered.push(db.insert_notification(
                    &user.identity,
                    &title,
                    &message,
                    kind,
                    link.as_deref(),
                )?);
            }
            Ok::<_, WorkflowError>(delivered)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        for notification in &notifications {
            self.feed.publish(StoreEvent::NotificationAdded {
                target: notification.target_user.clone(),
            });
        }
        Ok(notifications)
    }

    /// Fire-and-forget delivery to a single user.
    pub(crate) async fn notify_user_best_effort(
        &self,
        target: &str,
        title: &str,
        message: &str,
        kind: NotificationKind,
        link: Option<&str>,
    ) {
        if let Err(e) = self.notify_user(target, title, message, kind, link).await {
            log::warn!("Failed to notify user '{target}': {e}");
        }
    }

    /// Fire-and-forget delivery to a role.
    pub(crate) async fn notify_role_best_effort(
        &self,
        role: &str,
        title: &str,
        message: &str,
        kind: NotificationKind,
        link: Option<&str>,
    ) {
        if let Err(e) = self.notify_role(role, title, message, kind, link).await {
            log::warn!("Failed to notify role '{role}': {e}");
        }
    }

    /// Lists a user's notifications, newest first.
    pub async fn list_notifications(
        &self,
        params: &ListNotifications,
    ) -> Result<Vec<Notification>> {
        let db_path = self.db_path.clone();
        let user = params.user.clone();
        let unread_only = params.unread_only;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_notifications(&user, unread_only)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Marks a single notification as read.
    pub async fn mark_notification_read(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.mark_notification_read(id)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Registers a user, or updates the display name and role of an existing
    /// one.
    pub async fn add_user(&self, params: &AddUser) -> Result<()> {
        params.validate()?;
        let db_path = self.db_path.clone();
        let identity = params.identity.clone();
        let display_name = params
            .display_name
            .clone()
            .unwrap_or_else(|| params.identity.clone());
        let role = params.role.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.upsert_user(&identity, &display_name, &role)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Looks up a user profile by identity.
    pub async fn get_user(&self, identity: &str) -> Result<UserProfile> {
        let db_path = self.db_path.clone();
        let identity = identity.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_user(&identity)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Starts a new session for the user, rotating the stored token. Any
    /// session held by another client becomes stale immediately.
    pub async fn login(&self, identity: &str) -> Result<String> {
        let db_path = self.db_path.clone();
        let identity = identity.to_string();
        let token = Uuid::new_v4().to_string();
        let stored = token.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_session(&identity, &stored)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(token)
    }

    /// Stamps the user's activity clock, keeping their session alive.
    pub async fn touch_activity(&self, identity: &str) -> Result<()> {
        let db_path = self.db_path.clone();
        let identity = identity.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.touch_activity(&identity)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Checks a client's cached session token against the stored profile.
    pub async fn check_session(
        &self,
        identity: &str,
        cached_token: &str,
    ) -> Result<SessionVerdict> {
        let profile = self.get_user(identity).await?;
        Ok(SessionGuard.evaluate(&profile, cached_token, Timestamp::now()))
    }
}
