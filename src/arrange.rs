//! Row ordering
//!
//! With keys, rows are stably sorted by the keys and every column is permuted
//! the same way. Without keys, a grouped table has its groups reordered by
//! their label rows while each group keeps its internal row order; an
//! ungrouped table is returned unchanged.

use log::debug;

use crate::engine::Engine;
use crate::error::ColbindResult;
use crate::order::{RowComparator, SortKey};
use crate::table::{GroupMetadata, SortDirection, Table};

impl Engine {
    /// Reorder the rows of `table` by `keys`
    ///
    /// Group metadata of a grouped table follows its rows: with keys each
    /// group's index set is remapped to the new row positions, without keys
    /// the groups themselves are reordered by label.
    ///
    /// # Returns
    /// * `Ok(Table)` with the rows permuted
    /// * `Err(NotOrderable)` if a key (or group label) column is a list
    /// * `Err(LengthMismatch)` if a key length differs from the row count
    pub fn order_rows(&self, table: &Table, keys: &[SortKey]) -> ColbindResult<Table> {
        if keys.is_empty() {
            return match table.groups() {
                Some(groups) => self.order_groups(table, groups),
                None => Ok(table.clone()),
            };
        }

        let comparator = RowComparator::new(keys, table.row_count())?;
        self.check_interrupt()?;
        let permutation = comparator.permutation();
        debug!(
            "order_rows: sorted {} rows by {} keys",
            permutation.len(),
            comparator.key_count()
        );

        let mut result = table.take(&permutation);
        if let Some(groups) = table.groups() {
            let mut mapping = vec![None; table.row_count()];
            for (new, &old) in permutation.iter().enumerate() {
                mapping[old] = Some(new);
            }
            result.set_groups(Some(groups.remap(&mapping)))?;
        }
        Ok(result)
    }

    /// Reorder the rows of `table` by columns looked up by name
    ///
    /// # Returns
    /// * `Err(ColumnNotFound)` if a key name is not a column of `table`
    pub fn order_by_names(
        &self,
        table: &Table,
        keys: &[(&str, SortDirection)],
    ) -> ColbindResult<Table> {
        let keys = keys
            .iter()
            .map(|&(name, direction)| {
                let column = table.column_by_name(name)?.clone();
                Ok(SortKey::new(name, column, direction))
            })
            .collect::<ColbindResult<Vec<_>>>()?;
        self.order_rows(table, &keys)
    }

    fn order_groups(&self, table: &Table, groups: &GroupMetadata) -> ColbindResult<Table> {
        let labels = groups.labels();
        let group_order = RowComparator::for_table(labels)?.permutation();

        let mut master = Vec::with_capacity(table.row_count());
        let mut indices = Vec::with_capacity(group_order.len());
        for &group in &group_order {
            self.check_interrupt()?;
            let start = master.len();
            master.extend_from_slice(&groups.indices()[group]);
            indices.push((start..master.len()).collect::<Vec<usize>>());
        }

        debug!(
            "order_rows: reordered {} groups of a {}-row table",
            group_order.len(),
            table.row_count()
        );

        let metadata = GroupMetadata::new(groups.vars().to_vec(), labels.take(&group_order), indices)?;
        table.take(&master).with_groups(metadata)
    }
}
