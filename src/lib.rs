//! colbind library crate
//!
//! This is the library component of colbind, a small in-memory columnar
//! table engine. The library provides:
//!
//! - Typed, immutable, shareable columns (logical, integer, double,
//!   character, factor and list) with null markers
//! - Tables with an explicit row count and optional group metadata
//! - Row binding with type promotion through per-column collecters
//! - Column binding with shared column buffers
//! - Stable multi-key ordering, including group reordering for grouped tables
//! - Row deduplication by full-row equality
//! - Cooperative cancellation of long-running operations
//! - CSV loading with type inference and CSV output
//!
//! The operations are methods of [`engine::Engine`]; the free functions
//! below run them on a default engine.

pub mod arrange;
pub mod bind;
pub mod cli;
pub mod collecter;
pub mod column;
pub mod config;
pub mod csv_handler;
pub mod distinct;
pub mod engine;
pub mod error;
pub mod group;
pub mod interrupt;
pub mod order;
pub mod table;
pub mod visitor;

pub use column::{Column, ColumnData, DataType, Value};
pub use engine::Engine;
pub use error::{ColbindError, ColbindResult};
pub use interrupt::CancellationToken;
pub use order::SortKey;
pub use table::{GroupMetadata, SortDirection, Table};

/// Stack tables by rows on a default engine; see [`Engine::row_bind`]
pub fn row_bind<'a, I, T>(tables: I) -> ColbindResult<Table>
where
    I: IntoIterator<Item = T>,
    T: Into<Option<&'a Table>>,
{
    Engine::default().row_bind(tables)
}

/// Concatenate tables by columns on a default engine; see [`Engine::column_bind`]
pub fn column_bind<'a, I, T>(tables: I) -> ColbindResult<Table>
where
    I: IntoIterator<Item = T>,
    T: Into<Option<&'a Table>>,
{
    Engine::default().column_bind(tables)
}

/// Reorder rows on a default engine; see [`Engine::order_rows`]
pub fn order_rows(table: &Table, keys: &[SortKey]) -> ColbindResult<Table> {
    Engine::default().order_rows(table, keys)
}

/// Deduplicate rows on a default engine; see [`Engine::distinct_rows`]
pub fn distinct_rows(table: &Table) -> ColbindResult<Table> {
    Engine::default().distinct_rows(table)
}
