//! Engine entry point for colbind
//!
//! The [`Engine`] carries the execution context shared by every table
//! operation: the cancellation token and how often per-row loops poll it.
//! The operations themselves live in their own modules as `impl Engine`
//! blocks:
//!
//! - [`Engine::row_bind`] and [`Engine::column_bind`] in `bind`
//! - [`Engine::order_rows`] in `arrange`
//! - [`Engine::distinct_rows`] in `distinct`
//! - [`Engine::group_by`] in `group`

use crate::config::AppConfig;
use crate::error::ColbindResult;
use crate::interrupt::CancellationToken;

/// Rows processed between two cancellation checks in per-row loops
pub const DEFAULT_CHECK_INTERVAL: usize = 4096;

/// Execution context for table operations
#[derive(Debug, Clone)]
pub struct Engine {
    cancel: CancellationToken,
    check_interval: usize,
}

impl Engine {
    /// Create an engine with a fresh cancellation token
    pub fn new() -> Self {
        Engine {
            cancel: CancellationToken::new(),
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }

    /// Create an engine from the application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new().with_check_interval(config.check_interval())
    }

    /// Use `token` to cancel operations run by this engine
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Poll the cancellation token every `interval` rows (at least 1)
    pub fn with_check_interval(mut self, interval: usize) -> Self {
        self.check_interval = interval.max(1);
        self
    }

    /// The token polled by this engine
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Fail with `Interrupted` if cancellation was requested
    pub(crate) fn check_interrupt(&self) -> ColbindResult<()> {
        self.cancel.check()
    }

    /// Per-row variant of [`Engine::check_interrupt`]; polls every `check_interval` rows
    pub(crate) fn poll_interrupt(&self, row: usize) -> ColbindResult<()> {
        if row % self.check_interval == 0 {
            self.cancel.check()
        } else {
            Ok(())
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
