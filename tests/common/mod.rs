#![allow(dead_code)]

use sqlite_manager::{Logger, SqliteConfig, SqliteManager};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    age INTEGER
)";

/// Logger double that keeps every message.
#[derive(Default)]
pub struct RecordingLogger {
    pub errors: Mutex<Vec<String>>,
    pub infos: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Logger for RecordingLogger {
    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }
}

// Helper function to create a temporary file-based database
pub fn create_temp_db() -> anyhow::Result<(SqliteManager, TempDir)> {
    let dir = tempfile::tempdir()?;
    let manager = SqliteManager::open(dir.path().join("test.db"), false)?;
    Ok((manager, dir))
}

pub fn create_logged_db(
    logging_enabled: bool,
) -> anyhow::Result<(SqliteManager, Arc<RecordingLogger>, TempDir)> {
    let dir = tempfile::tempdir()?;
    let logger = Arc::new(RecordingLogger::default());
    let config = SqliteConfig::new(dir.path().join("test.db")).with_logging(logging_enabled);
    let manager = SqliteManager::from_config_with_logger(config, logger.clone())?;
    Ok((manager, logger, dir))
}

pub async fn create_users(manager: &SqliteManager) -> anyhow::Result<()> {
    manager.query(CREATE_USERS, &[]).await?;
    manager
        .query("INSERT INTO users (name, age) VALUES ('John Doe', 30)", &[])
        .await?;
    manager
        .query("INSERT INTO users (name, age) VALUES ('Jane Smith', 27)", &[])
        .await?;
    Ok(())
}
