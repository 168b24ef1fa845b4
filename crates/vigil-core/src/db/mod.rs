//! Database operations and SQLite management for the inspection store.
//!
//! This module provides low-level database operations for the Vigil
//! inspection tracking system. It handles SQLite connections, schema
//! management, and specialized query interfaces for plans, reports,
//! notifications, users, and the status audit trail.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod audit_queries;
pub mod migrations;
pub mod notification_queries;
pub mod plan_queries;
pub mod report_queries;
pub mod reschedule_queries;
pub mod task_queries;
pub mod user_queries;
pub(crate) mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
