//! Row hashing and equality
//!
//! [`RowVisitors`] hashes and compares whole rows across a fixed set of
//! columns of arbitrary types. A [`RowKey`] addresses one row through the
//! visitors, so standard hash sets and maps can be keyed by row content while
//! storing nothing but row indices.
//!
//! Equality follows the ordering policy: nulls equal nulls, all NaNs are
//! equal and `-0.0` equals `0.0`.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use crate::column::{canonical_bits, Column, ColumnData};
use crate::table::Table;

/// Hash and equality over rows of a set of equal-length columns
#[derive(Debug)]
pub struct RowVisitors<'a> {
    columns: Vec<&'a ColumnData>,
}

impl<'a> RowVisitors<'a> {
    /// Visit the given columns
    pub fn new<I>(columns: I) -> Self
    where
        I: IntoIterator<Item = &'a Column>,
    {
        RowVisitors {
            columns: columns.into_iter().map(Column::data).collect(),
        }
    }

    /// Visit every column of `table`
    pub fn for_table(table: &'a Table) -> Self {
        Self::new(table.columns())
    }

    /// Feed the content of `row` into `state`
    pub fn hash_row<H: Hasher>(&self, row: usize, state: &mut H) {
        for data in &self.columns {
            match data {
                ColumnData::Logical(v) => v[row].hash(state),
                ColumnData::Integer(v) => v[row].hash(state),
                ColumnData::Double(v) => v[row].map(canonical_bits).hash(state),
                ColumnData::Character(v) => v[row].hash(state),
                ColumnData::Factor(f) => f.codes[row].hash(state),
                ColumnData::List(v) => v[row].hash(state),
            }
        }
    }

    /// Whether rows `a` and `b` are equal on every column
    pub fn rows_equal(&self, a: usize, b: usize) -> bool {
        self.columns.iter().all(|data| match data {
            ColumnData::Logical(v) => v[a] == v[b],
            ColumnData::Integer(v) => v[a] == v[b],
            ColumnData::Double(v) => v[a].map(canonical_bits) == v[b].map(canonical_bits),
            ColumnData::Character(v) => v[a] == v[b],
            ColumnData::Factor(f) => f.codes[a] == f.codes[b],
            ColumnData::List(v) => v[a] == v[b],
        })
    }

    /// Hashable handle on one row
    pub fn key(&self, row: usize) -> RowKey<'_> {
        RowKey {
            visitors: self,
            row,
        }
    }
}

/// A row index that hashes and compares by row content
#[derive(Debug, Clone, Copy)]
pub struct RowKey<'a> {
    visitors: &'a RowVisitors<'a>,
    row: usize,
}

impl RowKey<'_> {
    /// The addressed row index
    pub fn row(&self) -> usize {
        self.row
    }
}

impl Hash for RowKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.visitors.hash_row(self.row, state);
    }
}

impl PartialEq for RowKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.visitors.rows_equal(self.row, other.row)
    }
}

impl Eq for RowKey<'_> {}

/// Set of row indices deduplicated by row content
#[derive(Debug)]
pub struct RowIndexSet<'a> {
    visitors: &'a RowVisitors<'a>,
    seen: HashSet<RowKey<'a>>,
}

impl<'a> RowIndexSet<'a> {
    /// Create an empty set over `visitors`
    pub fn new(visitors: &'a RowVisitors<'a>) -> Self {
        RowIndexSet {
            visitors,
            seen: HashSet::new(),
        }
    }

    /// Insert `row`; true if no equal row was inserted before
    pub fn insert(&mut self, row: usize) -> bool {
        self.seen.insert(self.visitors.key(row))
    }

    /// Number of distinct rows inserted so far
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing was inserted yet
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Value;

    #[test]
    fn test_rows_equal_across_types() {
        let a = Column::integer(vec![Some(1), Some(1), Some(1)]);
        let b = Column::double(vec![Some(0.0), Some(-0.0), Some(f64::NAN)]);
        let c = Column::list(vec![
            Value::List(vec![Value::Integer(1)]),
            Value::List(vec![Value::Integer(1)]),
            Value::Null,
        ]);
        let visitors = RowVisitors::new([&a, &b, &c]);
        assert!(visitors.rows_equal(0, 1));
        assert!(!visitors.rows_equal(0, 2));
    }

    #[test]
    fn test_index_set_keeps_first_occurrence() {
        let col = Column::character(vec![
            Some("a".into()),
            Some("b".into()),
            Some("a".into()),
            None,
            None,
        ]);
        let visitors = RowVisitors::new([&col]);
        let mut set = RowIndexSet::new(&visitors);
        let kept: Vec<usize> = (0..5).filter(|&i| set.insert(i)).collect();
        assert_eq!(kept, vec![0, 1, 3]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_nan_rows_collapse() {
        let col = Column::double(vec![Some(f64::NAN), Some(f64::NAN)]);
        let visitors = RowVisitors::new([&col]);
        let mut set = RowIndexSet::new(&visitors);
        assert!(set.insert(0));
        assert!(!set.insert(1));
    }
}
