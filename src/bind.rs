//! Row and column binding
//!
//! `row_bind` stacks tables vertically. Every output column is accumulated by
//! a [`Collecter`] created the first time its name is seen; when a later
//! input cannot be copied into the current collecter but a wider type covers
//! both, the collecter is replaced by a promoted one that re-absorbs the rows
//! collected so far.
//!
//! `column_bind` places tables side by side, sharing their column buffers.

use log::{debug, trace, warn};

use crate::collecter::Collecter;
use crate::engine::Engine;
use crate::error::{ColbindError, ColbindResult};
use crate::table::Table;

impl Engine {
    /// Stack tables by rows, unifying column types
    ///
    /// Absent tables, tables without columns and tables without rows are
    /// skipped. Output columns appear in first-seen order. Rows of a column
    /// that an input does not provide are left null.
    ///
    /// # Arguments
    /// * `tables` - Input tables; items may be `&Table` or `Option<&Table>`
    ///
    /// # Returns
    /// * `Ok(Table)` with as many rows as all inputs together, ungrouped
    /// * `Err(IncompatibleColumnType)` if a column cannot be unified
    /// * `Err(Interrupted)` if cancelled
    pub fn row_bind<'a, I, T>(&self, tables: I) -> ColbindResult<Table>
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<&'a Table>>,
    {
        let tables: Vec<Option<&Table>> = tables.into_iter().map(Into::into).collect();
        let n: usize = tables
            .iter()
            .flatten()
            .filter(|t| t.column_count() > 0)
            .map(|t| t.row_count())
            .sum();

        let mut names: Vec<String> = Vec::new();
        let mut collecters: Vec<Collecter> = Vec::new();
        let mut k = 0;

        for (i, table) in tables.iter().enumerate() {
            self.check_interrupt()?;

            let table = match table {
                Some(t) if t.column_count() > 0 && t.row_count() > 0 => *t,
                _ => {
                    trace!("row_bind: skipping empty input {}", i + 1);
                    continue;
                }
            };
            if table.is_grouped() {
                warn!("row_bind: group metadata of input {} dropped", i + 1);
            }
            let rows = table.row_count();

            for (name, source) in table.iter() {
                // linear scan: tables have few columns
                let index = match names.iter().position(|n| n == name) {
                    Some(index) => index,
                    None => {
                        trace!("row_bind: new column '{}' ({})", name, source.describe());
                        names.push(name.clone());
                        collecters.push(Collecter::for_column(source, n));
                        collecters.len() - 1
                    }
                };
                let slot = &mut collecters[index];

                if slot.compatible(source) {
                    slot.collect(k..k + rows, source)?;
                } else if slot.can_promote(source) {
                    let promoted = slot.promote(source)?;
                    debug!(
                        "row_bind: promoting column '{}' from {} to {} at input {}",
                        name,
                        slot.describe(),
                        promoted.describe(),
                        i + 1
                    );
                    let previous = std::mem::replace(slot, promoted).into_column();
                    slot.collect(0..k, &previous)?;
                    drop(previous);
                    slot.collect(k..k + rows, source)?;
                } else {
                    return Err(ColbindError::IncompatibleColumnType {
                        index: i + 1,
                        column: name.clone(),
                        accumulated: slot.describe(),
                        incoming: source.describe(),
                    });
                }
            }

            k += rows;
        }

        debug!(
            "row_bind: {} inputs, {} rows, {} columns",
            tables.len(),
            n,
            names.len()
        );

        let columns = names
            .into_iter()
            .zip(collecters.into_iter().map(Collecter::into_column))
            .collect();
        Table::with_row_count(columns, n)
    }

    /// Concatenate tables by columns
    ///
    /// Columns are shared with the inputs, not copied. Duplicate names are
    /// kept as they are. Absent tables are skipped.
    ///
    /// # Returns
    /// * `Ok(Table)` with the row count of the first table, ungrouped
    /// * `Err(RowCountMismatch)` if an input has a different row count
    /// * `Err(Interrupted)` if cancelled
    pub fn column_bind<'a, I, T>(&self, tables: I) -> ColbindResult<Table>
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<&'a Table>>,
    {
        let tables: Vec<(usize, &Table)> = tables
            .into_iter()
            .map(Into::into)
            .enumerate()
            .filter_map(|(i, t)| t.map(|t| (i, t)))
            .collect();

        let Some(&(_, first)) = tables.first() else {
            return Ok(Table::empty());
        };
        let expected = first.row_count();

        for &(i, table) in &tables[1..] {
            if table.row_count() != expected {
                return Err(ColbindError::RowCountMismatch {
                    index: i + 1,
                    rows: table.row_count(),
                    expected,
                });
            }
        }

        let mut columns = Vec::new();
        for &(i, table) in &tables {
            self.check_interrupt()?;
            if table.is_grouped() {
                warn!("column_bind: group metadata of input {} dropped", i + 1);
            }
            columns.extend(table.iter().map(|(name, column)| (name.clone(), column.clone())));
        }

        debug!(
            "column_bind: {} inputs, {} rows, {} columns",
            tables.len(),
            expected,
            columns.len()
        );
        Table::with_row_count(columns, expected)
    }
}
