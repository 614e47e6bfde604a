//! Configuration module for colbind
//!
//! This module provides a centralized configuration structure for the application.
//! It handles global settings that are passed down through the application rather
//! than using global state or passing individual settings.

use log::LevelFilter;

use crate::engine::DEFAULT_CHECK_INTERVAL;

/// Application configuration
///
/// This struct encapsulates all global configuration settings for the application.
/// It is created at startup and passed to components that need access to configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Whether to show verbose output
    verbose: bool,

    /// Custom field separator for input and output files
    field_separator: Option<String>,

    /// Columns to load as factors instead of inferring their type
    factor_columns: Vec<String>,

    /// Columns to group input tables by
    group_by: Vec<String>,

    /// Rows between two cancellation checks
    check_interval: usize,
}

impl AppConfig {
    /// Create a new application configuration
    ///
    /// # Arguments
    /// * `verbose` - Whether to show verbose output
    /// * `field_separator` - Optional field separator character from command line
    /// * `factor_columns` - Column names to load as factors
    /// * `group_by` - Column names to group by
    pub fn new(
        verbose: bool,
        field_separator: Option<String>,
        factor_columns: Vec<String>,
        group_by: Vec<String>,
    ) -> Self {
        Self {
            verbose,
            field_separator,
            factor_columns,
            group_by,
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }

    /// Get the verbose flag
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Log level matching the verbose flag
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }

    /// Get the field separator
    pub fn field_separator(&self) -> Option<&str> {
        self.field_separator.as_deref()
    }

    /// Get the factor column names
    pub fn factor_columns(&self) -> &[String] {
        &self.factor_columns
    }

    /// Get the grouping column names
    pub fn group_by(&self) -> &[String] {
        &self.group_by
    }

    /// Get the cancellation check interval
    pub fn check_interval(&self) -> usize {
        self.check_interval
    }

    /// Set the cancellation check interval
    pub fn set_check_interval(&mut self, interval: usize) {
        self.check_interval = interval;
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(false, None, Vec::new(), Vec::new())
    }
}
