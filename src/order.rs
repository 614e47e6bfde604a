//! Multi-key row ordering
//!
//! A [`RowComparator`] compares rows of a table by an ordered list of key
//! columns, each with its own direction, without knowing the key types at
//! compile time. Its only job is to produce a stable sorted permutation of
//! row indices; applying the permutation is left to [`Table::take`].
//!
//! Null policy: nulls sort last for every key, whatever its direction.
//! NaN doubles sort after every number and before nulls, also regardless of
//! direction.
//!
//! [`Table::take`]: crate::table::Table::take

use std::cmp::Ordering;

use crate::column::{Column, ColumnData};
use crate::error::{ColbindError, ColbindResult};
use crate::table::{SortDirection, Table};

/// One ordering key: a column and the direction to sort it in
#[derive(Debug, Clone)]
pub struct SortKey {
    /// Name used in error messages
    pub name: String,
    /// Key values, one per table row
    pub column: Column,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortKey {
    /// Create a key
    pub fn new(name: impl Into<String>, column: Column, direction: SortDirection) -> Self {
        SortKey {
            name: name.into(),
            column,
            direction,
        }
    }

    /// Create an ascending key
    pub fn ascending(name: impl Into<String>, column: Column) -> Self {
        Self::new(name, column, SortDirection::Ascending)
    }

    /// Create a descending key
    pub fn descending(name: impl Into<String>, column: Column) -> Self {
        Self::new(name, column, SortDirection::Descending)
    }
}

/// Compares rows by a validated list of keys
#[derive(Debug)]
pub struct RowComparator<'a> {
    keys: Vec<(&'a ColumnData, SortDirection)>,
    rows: usize,
}

impl<'a> RowComparator<'a> {
    /// Build a comparator over `keys` for a table of `rows` rows
    ///
    /// # Returns
    /// * `Err(NotOrderable)` if a key is a list column
    /// * `Err(LengthMismatch)` if a key length differs from `rows`
    pub fn new(keys: &'a [SortKey], rows: usize) -> ColbindResult<Self> {
        Self::build(
            keys.iter()
                .map(|k| (k.name.as_str(), &k.column, k.direction)),
            rows,
        )
    }

    /// Build an all-ascending comparator over every column of `table`
    pub fn for_table(table: &'a Table) -> ColbindResult<Self> {
        Self::build(
            table
                .iter()
                .map(|(name, column)| (name.as_str(), column, SortDirection::Ascending)),
            table.row_count(),
        )
    }

    fn build<I>(keys: I, rows: usize) -> ColbindResult<Self>
    where
        I: Iterator<Item = (&'a str, &'a Column, SortDirection)>,
    {
        let mut validated = Vec::new();
        for (name, column, direction) in keys {
            if let ColumnData::List(_) = column.data() {
                return Err(ColbindError::NotOrderable {
                    column: name.to_string(),
                    data_type: column.describe(),
                });
            }
            if column.len() != rows {
                return Err(ColbindError::LengthMismatch {
                    column: name.to_string(),
                    length: column.len(),
                    expected: rows,
                });
            }
            validated.push((column.data(), direction));
        }
        Ok(RowComparator {
            keys: validated,
            rows,
        })
    }

    /// Number of keys
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Compare rows `a` and `b` key by key
    pub fn compare(&self, a: usize, b: usize) -> Ordering {
        for &(data, direction) in &self.keys {
            let ordering = compare_key(data, direction, a, b);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Stable sorted permutation of `0..rows`
    ///
    /// Rows equal on every key keep their original relative order.
    pub fn permutation(&self) -> Vec<usize> {
        let mut index: Vec<usize> = (0..self.rows).collect();
        // sort_by is stable
        index.sort_by(|&a, &b| self.compare(a, b));
        index
    }
}

fn compare_nullable<T>(
    a: Option<T>,
    b: Option<T>,
    direction: SortDirection,
    cmp: impl FnOnce(T, T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => direction.apply(cmp(a, b)),
    }
}

/// 0 for numbers, 1 for NaN, 2 for null
fn double_rank(value: Option<f64>) -> u8 {
    match value {
        None => 2,
        Some(f) if f.is_nan() => 1,
        Some(_) => 0,
    }
}

fn compare_key(data: &ColumnData, direction: SortDirection, a: usize, b: usize) -> Ordering {
    match data {
        ColumnData::Logical(v) => compare_nullable(v[a], v[b], direction, |x, y| x.cmp(&y)),
        ColumnData::Integer(v) => compare_nullable(v[a], v[b], direction, |x, y| x.cmp(&y)),
        ColumnData::Double(v) => {
            let (ra, rb) = (double_rank(v[a]), double_rank(v[b]));
            if ra != 0 || rb != 0 {
                return ra.cmp(&rb);
            }
            compare_nullable(v[a], v[b], direction, |x, y| {
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            })
        }
        ColumnData::Character(v) => {
            compare_nullable(v[a].as_ref(), v[b].as_ref(), direction, |x, y| x.cmp(y))
        }
        ColumnData::Factor(f) => {
            compare_nullable(f.codes[a], f.codes[b], direction, |x, y| x.cmp(&y))
        }
        // rejected when the comparator is built
        ColumnData::List(_) => Ordering::Equal,
    }
}
