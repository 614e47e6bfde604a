//! Grouping
//!
//! `group_by` attaches group metadata to a table. Groups are discovered by
//! hashing the grouping columns row by row, so label rows appear in the order
//! their first row appears in the table, and every index set is ascending.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::debug;

use crate::column::Column;
use crate::engine::Engine;
use crate::error::ColbindResult;
use crate::table::{GroupMetadata, Table};
use crate::visitor::{RowKey, RowVisitors};

impl Engine {
    /// Group `table` by the named columns
    ///
    /// Any existing grouping is replaced.
    ///
    /// # Returns
    /// * `Ok(Table)` sharing the columns of `table`, with group metadata attached
    /// * `Err(ColumnNotFound)` if a grouping variable is not a column
    /// * `Err(Interrupted)` if cancelled
    pub fn group_by(&self, table: &Table, vars: &[&str]) -> ColbindResult<Table> {
        let columns = vars
            .iter()
            .map(|name| table.column_by_name(name))
            .collect::<ColbindResult<Vec<&Column>>>()?;

        let visitors = RowVisitors::new(columns.iter().copied());
        let mut groups: HashMap<RowKey<'_>, usize> = HashMap::new();
        let mut indices: Vec<Vec<usize>> = Vec::new();
        let mut first_rows = Vec::new();

        for row in 0..table.row_count() {
            self.poll_interrupt(row)?;
            match groups.entry(visitors.key(row)) {
                Entry::Occupied(entry) => indices[*entry.get()].push(row),
                Entry::Vacant(entry) => {
                    entry.insert(indices.len());
                    indices.push(vec![row]);
                    first_rows.push(row);
                }
            }
        }
        debug!(
            "group_by: {} groups over {:?} in {} rows",
            indices.len(),
            vars,
            table.row_count()
        );

        let labels = Table::with_row_count(
            vars.iter()
                .zip(&columns)
                .map(|(name, column)| (name.to_string(), column.take(&first_rows)))
                .collect(),
            first_rows.len(),
        )?;
        let metadata = GroupMetadata::new(
            vars.iter().map(|name| name.to_string()).collect(),
            labels,
            indices,
        )?;
        table.clone().with_groups(metadata)
    }
}
