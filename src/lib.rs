//! Async convenience layer over an embedded SQLite database.
//!
//! # Intention
//!
//! - Open a database file and keep exactly one connection to it.
//! - Install a bundled database into a writable directory once.
//! - Run parameterized SQL and hand back rows as column-name maps.
//! - Answer "does this value exist" by column or by primary key.
//!
//! # Architectural Boundaries
//!
//! - Storage, indexing and query planning belong to SQLite.
//! - No pooling, caching or retries. Every failure is reported once.
//! - Table and column names are interpolated into SQL unescaped; keeping
//!   them trusted is the caller's job.

pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod schema;
pub mod sqlite;
mod statement;
pub mod value;

pub use config::SqliteConfig;
pub use error::{Result, SqliteManagerError};
pub use logging::{Logger, TracingLogger};
pub use schema::{
    ColumnConstraint, ColumnDefinition, DataType, DefaultValue, IndexDefinition, Schema,
    TableDefinition,
};
pub use sqlite::{QueryExecutor, SqliteManager};
pub use value::{Row, Value};
