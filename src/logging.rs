//! Diagnostic logging for the manager.
//!
//! The logger is handed to the manager at construction. The default
//! [`TracingLogger`] forwards to `tracing`; installing a subscriber is left
//! to the application.

/// Target used for every event emitted by [`TracingLogger`].
pub const LOG_TARGET: &str = "sqlite_manager";

/// Subsystem identifier attached to every event.
pub const LOG_SUBSYSTEM: &str = "sqlite_manager::SqliteManager";

pub trait Logger: Send + Sync {
    fn error(&self, message: &str);
    fn info(&self, message: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, message: &str) {
        tracing::error!(target: LOG_TARGET, subsystem = LOG_SUBSYSTEM, "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: LOG_TARGET, subsystem = LOG_SUBSYSTEM, "{}", message);
    }
}
