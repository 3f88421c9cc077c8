use crate::config::SqliteConfig;
use crate::error::{engine_message, Result, SqliteManagerError};
use crate::fs;
use crate::logging::{Logger, TracingLogger};
use crate::statement;
use crate::value::{Row, Value};
use async_trait::async_trait;
use futures::lock::Mutex;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The async surface of the manager, so callers can swap in a test double.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Runs `sql` with positional `parameters` and returns every row.
    async fn query(&self, sql: &str, parameters: &[Value]) -> Result<Vec<Row>>;

    /// Whether `entry` appears in `column` of `table`.
    async fn exists_in_column(&self, table: &str, column: &str, entry: &str) -> Result<bool>;

    /// Whether `value` appears in the primary key column of `table`.
    async fn exists_by_primary_key(&self, table: &str, value: Value) -> Result<bool>;
}

/// Owns one open SQLite connection for its whole lifetime.
///
/// All operations are lazy futures: nothing touches the database until the
/// future is polled. Calls on the same manager are serialized on the
/// connection.
///
/// Table and column names passed to [`SqliteManager::exists_in_column`] and
/// [`SqliteManager::exists_by_primary_key`] are interpolated into the SQL
/// text as-is. Never pass identifiers that come from untrusted input.
pub struct SqliteManager {
    path: PathBuf,
    logging_enabled: bool,
    logger: Arc<dyn Logger>,
    conn: Mutex<Connection>,
}

impl SqliteManager {
    /// Opens (or creates) the database at `path`.
    pub fn open(path: impl AsRef<Path>, logging_enabled: bool) -> Result<Self> {
        Self::from_config(SqliteConfig::new(path).with_logging(logging_enabled))
    }

    pub fn from_config(config: SqliteConfig) -> Result<Self> {
        Self::from_config_with_logger(config, Arc::new(TracingLogger))
    }

    /// Opens the database described by `config`, reporting through `logger`.
    /// A schema in the config is applied right after opening.
    pub fn from_config_with_logger(
        config: SqliteConfig,
        logger: Arc<dyn Logger>,
    ) -> Result<Self> {
        let log_error = |message: String| {
            if config.logging_enabled {
                logger.error(&message);
            }
        };

        let conn = Connection::open(&config.db_path).map_err(|e| {
            let message = engine_message(&e);
            log_error(format!("Error opening database: {}", message));
            SqliteManagerError::OpenFailed(message)
        })?;

        if let Some(schema) = &config.schema {
            for sql in schema.to_sql() {
                conn.execute_batch(&sql).map_err(|e| {
                    let message =
                        format!("Failed to initialize schema: {}", engine_message(&e));
                    log_error(message.clone());
                    SqliteManagerError::CommonFailed(message)
                })?;
            }
        }

        if config.logging_enabled {
            logger.info(&format!(
                "opened sqlite database at path: {}",
                config.db_path.display()
            ));
        }

        Ok(Self {
            path: config.db_path,
            logging_enabled: config.logging_enabled,
            logger,
            conn: Mutex::new(conn),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.logging_enabled
    }

    /// Closes the connection. Dropping the manager does the same, silently.
    pub fn close(self) -> Result<()> {
        let Self {
            logging_enabled,
            logger,
            conn,
            ..
        } = self;
        conn.into_inner().close().map_err(|(_conn, e)| {
            let message = engine_message(&e);
            if logging_enabled {
                logger.error(&format!("Error closing database: {}", message));
            }
            SqliteManagerError::CommonFailed(message)
        })
    }

    /// Copies `source_file_path` into the `target_path` directory unless a
    /// file with the same name already lives there. Returns the target file.
    pub fn copy_database_to_target(
        &self,
        source_file_path: &Path,
        target_path: &Path,
    ) -> Result<PathBuf> {
        fs::install_database(source_file_path, target_path).map_err(|e| {
            if self.logging_enabled {
                self.logger.error(&format!("Failed to copy database: {}", e));
            }
            SqliteManagerError::CommonFailed(e.to_string())
        })
    }

    pub async fn query(&self, sql: &str, parameters: &[Value]) -> Result<Vec<Row>> {
        let conn = self.conn.lock().await;
        statement::run(&conn, sql, parameters, statement::row_to_map)
            .map_err(|e| self.fail(e))
    }

    pub async fn exists_in_column(&self, table: &str, column: &str, entry: &str) -> Result<bool> {
        let sql = statement::exists_sql(table, column);
        let conn = self.conn.lock().await;
        let params = [Value::from(entry)];
        let flags = statement::run(&conn, &sql, &params, statement::exists_flag)
            .map_err(|e| self.fail(e))?;
        Ok(flags.first().copied().unwrap_or(false))
    }

    pub async fn exists_by_primary_key(
        &self,
        table: &str,
        value: impl Into<Value>,
    ) -> Result<bool> {
        let value = value.into();
        let conn = self.conn.lock().await;

        let columns = statement::table_info(&conn, table).map_err(|e| self.fail(e))?;
        if columns.is_empty() {
            return Err(self.fail(SqliteManagerError::PrepareFailed(format!(
                "No such table: {}",
                table
            ))));
        }
        let primary_key = columns.into_iter().find(|c| c.pk != 0).ok_or_else(|| {
            self.fail(SqliteManagerError::PrepareFailed(format!(
                "Primary key not found for table {}",
                table
            )))
        })?;

        if !matches!(value, Value::Integer(_) | Value::Text(_)) {
            return Err(self.fail(SqliteManagerError::BindFailed(
                "Unsupported primary key type".to_string(),
            )));
        }

        let sql = statement::exists_sql(table, &primary_key.name);
        let flags = statement::run(&conn, &sql, &[value], statement::exists_flag)
            .map_err(|e| self.fail(e))?;
        Ok(flags.first().copied().unwrap_or(false))
    }

    /// Logs `err` when logging is enabled and hands it back.
    fn fail(&self, err: SqliteManagerError) -> SqliteManagerError {
        if self.logging_enabled {
            self.logger.error(&format!("Error: {}", err));
        }
        err
    }
}

#[async_trait]
impl QueryExecutor for SqliteManager {
    async fn query(&self, sql: &str, parameters: &[Value]) -> Result<Vec<Row>> {
        SqliteManager::query(self, sql, parameters).await
    }

    async fn exists_in_column(
        &self,
        table: &str,
        column: &str,
        entry: &str,
    ) -> Result<bool> {
        SqliteManager::exists_in_column(self, table, column, entry).await
    }

    async fn exists_by_primary_key(&self, table: &str, value: Value) -> Result<bool> {
        SqliteManager::exists_by_primary_key(self, table, value).await
    }
}

impl std::fmt::Debug for SqliteManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteManager")
            .field("path", &self.path)
            .field("logging_enabled", &self.logging_enabled)
            .finish_non_exhaustive()
    }
}
