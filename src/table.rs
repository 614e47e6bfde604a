//! Table module for colbind
//!
//! This module provides the in-memory table representation:
//!
//! - An ordered list of named columns, all of the same length
//! - An explicit row count, so tables without columns still know their size
//! - Optional, strongly typed group metadata describing a partition of the rows
//! - The generic "take rows by index" subset used by ordering and deduplication

use serde::{Deserialize, Serialize};

use crate::column::{Column, Value};
use crate::error::{ColbindError, ColbindResult};

/// Sort direction for an ordering key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Sort in ascending order (default)
    Ascending,
    /// Sort in descending order
    Descending,
}

impl SortDirection {
    /// Apply the direction to an ascending comparison result
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Grouping structure of a table
///
/// Group `i` is described by label row `i` of `labels` and by the row
/// indices in `indices[i]`. The index sets partition `0..rows` of the owning
/// table.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMetadata {
    vars: Vec<String>,
    labels: Box<Table>,
    indices: Vec<Vec<usize>>,
    sizes: Vec<usize>,
    biggest: usize,
}

impl GroupMetadata {
    /// Build group metadata from grouping variable names, label rows and index sets
    ///
    /// Sizes and the largest group size are derived from `indices`.
    ///
    /// # Returns
    /// * `Err(InvalidGroups)` if the label table and index sets disagree on the group count
    pub fn new(vars: Vec<String>, labels: Table, indices: Vec<Vec<usize>>) -> ColbindResult<Self> {
        if labels.row_count() != indices.len() {
            return Err(ColbindError::InvalidGroups(format!(
                "{} label rows for {} index sets",
                labels.row_count(),
                indices.len()
            )));
        }
        let sizes: Vec<usize> = indices.iter().map(Vec::len).collect();
        let biggest = sizes.iter().copied().max().unwrap_or(0);
        Ok(GroupMetadata {
            vars,
            labels: Box::new(labels),
            indices,
            sizes,
            biggest,
        })
    }

    /// Names of the grouping variables
    pub fn vars(&self) -> &[String] {
        &self.vars
    }

    /// One label row per group
    pub fn labels(&self) -> &Table {
        &self.labels
    }

    /// Row index set of each group
    pub fn indices(&self) -> &[Vec<usize>] {
        &self.indices
    }

    /// Number of rows in each group
    pub fn group_sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Size of the largest group
    pub fn biggest_group_size(&self) -> usize {
        self.biggest
    }

    /// Number of groups
    pub fn group_count(&self) -> usize {
        self.indices.len()
    }

    /// Check that the index sets partition `0..rows`
    pub fn validate(&self, rows: usize) -> ColbindResult<()> {
        let mut seen = vec![false; rows];
        for (group, idx) in self.indices.iter().enumerate() {
            for &row in idx {
                if row >= rows {
                    return Err(ColbindError::InvalidGroups(format!(
                        "group {} references row {} of a {}-row table",
                        group, row, rows
                    )));
                }
                if seen[row] {
                    return Err(ColbindError::InvalidGroups(format!(
                        "row {} belongs to more than one group",
                        row
                    )));
                }
                seen[row] = true;
            }
        }
        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(ColbindError::InvalidGroups(format!(
                "row {} belongs to no group",
                missing
            )));
        }
        Ok(())
    }

    /// Rewrite every index set through `mapping` (old row -> new row)
    ///
    /// Rows mapped to `None` are dropped. Labels and group order are kept;
    /// each new index set is ascending.
    pub(crate) fn remap(&self, mapping: &[Option<usize>]) -> GroupMetadata {
        let indices: Vec<Vec<usize>> = self
            .indices
            .iter()
            .map(|idx| {
                let mut moved: Vec<usize> = idx.iter().filter_map(|&row| mapping[row]).collect();
                moved.sort_unstable();
                moved
            })
            .collect();
        let sizes: Vec<usize> = indices.iter().map(Vec::len).collect();
        let biggest = sizes.iter().copied().max().unwrap_or(0);
        GroupMetadata {
            vars: self.vars.clone(),
            labels: self.labels.clone(),
            indices,
            sizes,
            biggest,
        }
    }
}

/// Represents an in-memory table
///
/// Column names are not required to be unique: a column bind preserves
/// duplicates as given.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column names, aligned with `columns`
    names: Vec<String>,

    /// Column data
    columns: Vec<Column>,

    /// Number of rows
    row_count: usize,

    /// Grouping structure, if the table is grouped
    groups: Option<GroupMetadata>,
}

impl Table {
    /// Create a table from named columns
    ///
    /// The row count is the length of the first column, or zero if there are
    /// no columns.
    ///
    /// # Returns
    /// * `Err(LengthMismatch)` if the columns have different lengths
    pub fn new(columns: Vec<(String, Column)>) -> ColbindResult<Self> {
        let rows = columns.first().map_or(0, |(_, c)| c.len());
        Self::with_row_count(columns, rows)
    }

    /// Create a table with an explicit row count
    ///
    /// This is the only way to build a table without columns but with rows.
    pub fn with_row_count(columns: Vec<(String, Column)>, rows: usize) -> ColbindResult<Self> {
        for (name, column) in &columns {
            if column.len() != rows {
                return Err(ColbindError::LengthMismatch {
                    column: name.clone(),
                    length: column.len(),
                    expected: rows,
                });
            }
        }
        let (names, columns) = columns.into_iter().unzip();
        Ok(Table {
            names,
            columns,
            row_count: rows,
            groups: None,
        })
    }

    /// A table with no columns and no rows
    pub fn empty() -> Self {
        Table {
            names: Vec::new(),
            columns: Vec::new(),
            row_count: 0,
            groups: None,
        }
    }

    /// Column names in declared order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Columns in declared order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Iterate over `(name, column)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Column)> {
        self.names.iter().zip(self.columns.iter())
    }

    /// Get the column count
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the row count
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get the index of the first column with the given name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Get the first column with the given name
    pub fn column_by_name(&self, name: &str) -> ColbindResult<&Column> {
        self.column_index(name)
            .map(|i| &self.columns[i])
            .ok_or_else(|| ColbindError::ColumnNotFound(name.to_string()))
    }

    /// Values of one row, in column order
    pub fn row(&self, row: usize) -> Vec<Value> {
        self.columns.iter().map(|c| c.value(row)).collect()
    }

    /// Group metadata, if the table is grouped
    pub fn groups(&self) -> Option<&GroupMetadata> {
        self.groups.as_ref()
    }

    /// Whether the table carries group metadata
    pub fn is_grouped(&self) -> bool {
        self.groups.is_some()
    }

    /// Attach or clear group metadata
    ///
    /// # Returns
    /// * `Err(InvalidGroups)` if the index sets do not partition the rows
    pub fn set_groups(&mut self, groups: Option<GroupMetadata>) -> ColbindResult<()> {
        if let Some(g) = &groups {
            g.validate(self.row_count)?;
        }
        self.groups = groups;
        Ok(())
    }

    /// Builder form of [`Table::set_groups`]
    pub fn with_groups(mut self, groups: GroupMetadata) -> ColbindResult<Self> {
        self.set_groups(Some(groups))?;
        Ok(self)
    }

    /// Drop group metadata
    pub fn ungroup(mut self) -> Self {
        self.groups = None;
        self
    }

    /// New ungrouped table made of the rows at `indices`, in that order
    pub fn take(&self, indices: &[usize]) -> Table {
        Table {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.take(indices)).collect(),
            row_count: indices.len(),
            groups: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(vec![
            ("id".to_string(), Column::integer(vec![Some(1), Some(2), Some(3)])),
            (
                "name".to_string(),
                Column::character(vec![Some("a".into()), Some("b".into()), None]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_ragged_columns() {
        let result = Table::new(vec![
            ("a".to_string(), Column::integer(vec![Some(1), Some(2)])),
            ("b".to_string(), Column::integer(vec![Some(1)])),
        ]);
        match result {
            Err(ColbindError::LengthMismatch {
                column,
                length,
                expected,
            }) => {
                assert_eq!(column, "b");
                assert_eq!(length, 1);
                assert_eq!(expected, 2);
            }
            other => panic!("Expected LengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_row_count_without_columns() {
        let table = Table::with_row_count(Vec::new(), 4).unwrap();
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_take_rows() {
        let table = sample().take(&[2, 0]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.row(0), vec![Value::Integer(3), Value::Null]);
        assert_eq!(
            table.row(1),
            vec![Value::Integer(1), Value::String("a".into())]
        );
    }

    #[test]
    fn test_column_lookup() {
        let table = sample();
        assert_eq!(table.column_index("name"), Some(1));
        assert!(matches!(
            table.column_by_name("missing"),
            Err(ColbindError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_set_groups_validates_partition() {
        let labels = Table::new(vec![(
            "g".to_string(),
            Column::character(vec![Some("x".into()), Some("y".into())]),
        )])
        .unwrap();

        let overlapping =
            GroupMetadata::new(vec!["g".into()], labels.clone(), vec![vec![0, 1], vec![1, 2]])
                .unwrap();
        let mut table = sample();
        assert!(matches!(
            table.set_groups(Some(overlapping)),
            Err(ColbindError::InvalidGroups(_))
        ));

        let incomplete =
            GroupMetadata::new(vec!["g".into()], labels.clone(), vec![vec![0], vec![2]]).unwrap();
        assert!(table.set_groups(Some(incomplete)).is_err());

        let good = GroupMetadata::new(vec!["g".into()], labels, vec![vec![0, 2], vec![1]]).unwrap();
        table.set_groups(Some(good)).unwrap();
        let groups = table.groups().unwrap();
        assert_eq!(groups.group_sizes(), &[2, 1]);
        assert_eq!(groups.biggest_group_size(), 2);
    }

    #[test]
    fn test_group_label_count_must_match() {
        let labels = Table::new(vec![(
            "g".to_string(),
            Column::character(vec![Some("x".into())]),
        )])
        .unwrap();
        let result = GroupMetadata::new(vec!["g".into()], labels, vec![vec![0], vec![1]]);
        assert!(matches!(result, Err(ColbindError::InvalidGroups(_))));
    }

    #[test]
    fn test_sort_direction_apply() {
        use std::cmp::Ordering;
        assert_eq!(SortDirection::Ascending.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortDirection::Descending.apply(Ordering::Less), Ordering::Greater);
    }
}
