//! SQLite database connection and schema management
//!
//! Manages the `~/.scribbly/gamify.db` database holding per-user activity
//! days, lifetime counters, coloring statistics, streaks, and awarded badges.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Errors surfaced by the storage layer itself.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open database: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Database wrapper shared by the recorder, reader, and badge manager
#[derive(Clone)]
pub struct GamifyDb {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl GamifyDb {
    /// Open or create the database at the default location (~/.scribbly/gamify.db)
    pub fn open_default() -> Result<Self> {
        let db_path = Self::default_path();
        Self::open(&db_path)
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".scribbly")
            .join("gamify.db")
    }

    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(StoreError::Io)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .map_err(StoreError::Sqlite)
            .with_context(|| format!("Failed to open gamify db: {}", path.display()))?;

        // WAL so progress reads never block the write path
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Open an in-memory database, used by unit tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Get a reference to the connection
    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("Gamify DB lock poisoned")
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Delete all gamification data (debug/settings surface)
    pub fn reset_all(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(
            r#"
            DELETE FROM awarded_badges;
            DELETE FROM activity_days;
            DELETE FROM user_counters;
            DELETE FROM coloring_stats;
            DELETE FROM streaks;
            "#,
        )?;
        Ok(())
    }
}

/// Full schema. All statements are idempotent (IF NOT EXISTS).
const SCHEMA_SQL: &str = r#"
-- Lifetime counters, one row per user
CREATE TABLE IF NOT EXISTS user_counters (
    user_id TEXT PRIMARY KEY,
    analyses_completed INTEGER NOT NULL DEFAULT 0,
    stories_completed INTEGER NOT NULL DEFAULT 0,
    coloring_pages_generated INTEGER NOT NULL DEFAULT 0,
    test_types TEXT NOT NULL DEFAULT '[]',
    child_profiles INTEGER NOT NULL DEFAULT 0,
    profile_complete INTEGER NOT NULL DEFAULT 0,
    updated_at INTEGER NOT NULL DEFAULT 0
);

-- One row per (user, local calendar date)
CREATE TABLE IF NOT EXISTS activity_days (
    user_id TEXT NOT NULL,
    day TEXT NOT NULL,
    analyses INTEGER NOT NULL DEFAULT 0,
    stories INTEGER NOT NULL DEFAULT 0,
    coloring_pages INTEGER NOT NULL DEFAULT 0,
    profile_edits INTEGER NOT NULL DEFAULT 0,
    first_activity_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, day)
);
CREATE INDEX IF NOT EXISTS idx_activity_user ON activity_days(user_id);

-- Coloring aggregates, one row per user; set-valued fields are JSON arrays
CREATE TABLE IF NOT EXISTS coloring_stats (
    user_id TEXT PRIMARY KEY,
    completed INTEGER NOT NULL DEFAULT 0,
    colors_used TEXT NOT NULL DEFAULT '[]',
    max_colors INTEGER NOT NULL DEFAULT 0,
    brushes_used TEXT NOT NULL DEFAULT '[]',
    premium_brushes_used TEXT NOT NULL DEFAULT '[]',
    assistive_uses INTEGER NOT NULL DEFAULT 0,
    undo_then_continue INTEGER NOT NULL DEFAULT 0,
    total_minutes INTEGER NOT NULL DEFAULT 0,
    quick_sessions INTEGER NOT NULL DEFAULT 0,
    marathon_sessions INTEGER NOT NULL DEFAULT 0,
    current_streak INTEGER NOT NULL DEFAULT 0,
    best_streak INTEGER NOT NULL DEFAULT 0,
    last_coloring_day TEXT,
    updated_at INTEGER NOT NULL DEFAULT 0
);

-- Daily-activity streak per user
CREATE TABLE IF NOT EXISTS streaks (
    user_id TEXT NOT NULL,
    streak_type TEXT NOT NULL,
    current_count INTEGER NOT NULL DEFAULT 0,
    best_count INTEGER NOT NULL DEFAULT 0,
    last_activity_day TEXT,
    updated_at INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (user_id, streak_type)
);

-- Unlocked badges; the primary key is what makes awards idempotent
CREATE TABLE IF NOT EXISTS awarded_badges (
    user_id TEXT NOT NULL,
    badge_id TEXT NOT NULL,
    unlocked_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, badge_id)
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_schema() {
        let dir = tempdir().unwrap();
        let db = GamifyDb::open(&dir.path().join("gamify.db")).unwrap();

        let conn = db.conn();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM awarded_badges", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_reset_all() {
        let db = GamifyDb::open_in_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO awarded_badges (user_id, badge_id, unlocked_at) VALUES ('u', 'b', 0)",
                [],
            )
            .unwrap();
        db.reset_all().unwrap();
        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM awarded_badges", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
