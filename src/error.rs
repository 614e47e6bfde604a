//! Error handling for colbind
//!
//! This module defines the error type shared by every table operation.
//! All engine errors are fatal: an operation that fails never hands back a
//! partially built table.
//!
//! The module uses thiserror to minimize boilerplate code and keep the
//! messages consistent across the crate.

use thiserror::Error;

/// ColbindError represents all possible errors that can occur in colbind
///
/// The first five variants are the engine taxonomy raised by the table
/// operations themselves. The remaining ones come from building tables,
/// loading files and parsing command-line key specifications.
#[derive(Error, Debug)]
pub enum ColbindError {
    /// A row bind met a column that cannot be unified with what was already
    /// collected under the same name, even after promotion
    #[error(
        "incompatible type (data index: {index}, column: '{column}', was collecting: {accumulated}, incompatible with data of type: {incoming})"
    )]
    IncompatibleColumnType {
        /// 1-based position of the offending input table
        index: usize,
        /// Name of the column being collected
        column: String,
        /// Description of the accumulated type
        accumulated: String,
        /// Description of the incoming column type
        incoming: String,
    },

    /// A column bind was given tables with different row counts
    #[error("incompatible number of rows (data index: {index}, {rows} rows, expecting {expected})")]
    RowCountMismatch {
        /// 1-based position of the offending input table
        index: usize,
        /// Row count of the offending table
        rows: usize,
        /// Row count of the first table
        expected: usize,
    },

    /// An ordering key has a type with no defined comparison
    #[error("cannot arrange column '{column}' of type '{data_type}'")]
    NotOrderable {
        /// Name of the key column
        column: String,
        /// Description of the key column type
        data_type: String,
    },

    /// A column length disagrees with the table row count
    #[error("incorrect size for column '{column}' ({length}), expecting {expected}")]
    LengthMismatch {
        /// Name of the column
        column: String,
        /// Actual length
        length: usize,
        /// Expected length (the table row count)
        expected: usize,
    },

    /// The operation was cancelled through its cancellation token
    #[error("operation interrupted")]
    Interrupted,

    /// A collecter was asked to absorb a column it cannot hold
    #[error("type mismatch: cannot collect {found} into {expected}")]
    TypeMismatch {
        /// Type the collecter is accumulating
        expected: String,
        /// Type of the rejected source column
        found: String,
    },

    /// Error when a referenced column doesn't exist in a table
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// Group metadata that does not partition the table rows
    #[error("Invalid group metadata: {0}")]
    InvalidGroups(String),

    /// Field separator that is not a single byte
    #[error("Invalid delimiter: {0}. Must be a single character.")]
    InvalidDelimiter(String),

    /// Malformed ordering key on the command line
    #[error("Invalid key specification: {0}")]
    InvalidKeySpec(String),

    /// Error during file system operations (reading/writing files)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error while parsing or writing CSV data
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type alias for operations that can produce a ColbindError
pub type ColbindResult<T> = std::result::Result<T, ColbindError>;
