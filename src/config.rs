use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// SQLite manager configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqliteConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
    /// Emit failures to the logger. Off by default.
    #[serde(default)]
    pub logging_enabled: bool,
    /// Tables and indexes created when the database is opened
    #[serde(default)]
    pub schema: Option<Schema>,
}

impl SqliteConfig {
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
            logging_enabled: false,
            schema: None,
        }
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }
}
