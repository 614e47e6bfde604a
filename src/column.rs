//! Column module for colbind
//!
//! A column is a fixed-length, homogeneous sequence of values of one semantic
//! type with per-element null markers. Columns are immutable once built and
//! share their buffer on clone, so passing a column through several tables
//! never copies its values.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ColbindError, ColbindResult};

/// Represents a single cell value
///
/// This is the dynamic view of a column element. Typed columns store their
/// values natively; `Value` is used where the type is not known statically,
/// chiefly as the element type of list columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Represents a NULL or missing value
    Null,
    /// Boolean value (true/false)
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Double(f64),
    /// UTF-8 string (also used for factor labels)
    String(String),
    /// Nested list of values
    List(Vec<Value>),
}

/// Canonical bit pattern of a double for hashing and equality
///
/// All NaNs collapse to one pattern and `-0.0` collapses to `0.0`, so that
/// equal-looking doubles hash identically.
pub(crate) fn canonical_bits(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0
    } else {
        f.to_bits()
    }
}

/// Equality of values of the same kind
///
/// Unlike numeric comparison in expressions, values of different kinds are
/// never equal here; this keeps `Eq` consistent with `Hash`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => canonical_bits(*a) == canonical_bits(*b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => 0_u8.hash(state),
            Value::Boolean(b) => {
                1_u8.hash(state);
                b.hash(state);
            }
            Value::Integer(i) => {
                2_u8.hash(state);
                i.hash(state);
            }
            Value::Double(f) => {
                3_u8.hash(state);
                canonical_bits(*f).hash(state);
            }
            Value::String(s) => {
                4_u8.hash(state);
                s.hash(state);
            }
            Value::List(items) => {
                5_u8.hash(state);
                items.hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NA"),
            Value::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Double(d) => write!(f, "{}", d),
            Value::String(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// The closed set of column element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Booleans
    Logical,
    /// 64-bit signed integers
    Integer,
    /// 64-bit floats
    Double,
    /// UTF-8 strings
    Character,
    /// Categorical values drawn from a level set
    Factor,
    /// Opaque nested values
    List,
}

impl DataType {
    /// Short lowercase name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Logical => "logical",
            DataType::Integer => "integer",
            DataType::Double => "double",
            DataType::Character => "character",
            DataType::Factor => "factor",
            DataType::List => "list",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage of a factor column: a level set and one optional level code per row
#[derive(Debug, Clone, PartialEq)]
pub struct FactorData {
    /// Distinct labels, in level order
    pub levels: Vec<String>,
    /// Index into `levels` for each row, `None` for null
    pub codes: Vec<Option<u32>>,
}

impl FactorData {
    /// Label of the row, if not null
    pub fn label(&self, row: usize) -> Option<&str> {
        self.codes[row].map(|code| self.levels[code as usize].as_str())
    }
}

/// Typed storage backing a column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Boolean column
    Logical(Vec<Option<bool>>),
    /// Integer column
    Integer(Vec<Option<i64>>),
    /// Double column
    Double(Vec<Option<f64>>),
    /// String column
    Character(Vec<Option<String>>),
    /// Factor column
    Factor(FactorData),
    /// List column; nulls are `Value::Null`
    List(Vec<Value>),
}

impl ColumnData {
    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Logical(v) => v.len(),
            ColumnData::Integer(v) => v.len(),
            ColumnData::Double(v) => v.len(),
            ColumnData::Character(v) => v.len(),
            ColumnData::Factor(f) => f.codes.len(),
            ColumnData::List(v) => v.len(),
        }
    }

    /// Whether the column holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnData::Logical(_) => DataType::Logical,
            ColumnData::Integer(_) => DataType::Integer,
            ColumnData::Double(_) => DataType::Double,
            ColumnData::Character(_) => DataType::Character,
            ColumnData::Factor(_) => DataType::Factor,
            ColumnData::List(_) => DataType::List,
        }
    }
}

fn take_vec<T: Clone>(values: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| values[i].clone()).collect()
}

/// An immutable, cheaply clonable column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    data: Arc<ColumnData>,
}

impl Column {
    /// Wrap already built storage
    pub fn from_data(data: ColumnData) -> Self {
        Column {
            data: Arc::new(data),
        }
    }

    /// Build a boolean column
    pub fn logical(values: Vec<Option<bool>>) -> Self {
        Self::from_data(ColumnData::Logical(values))
    }

    /// Build an integer column
    pub fn integer(values: Vec<Option<i64>>) -> Self {
        Self::from_data(ColumnData::Integer(values))
    }

    /// Build a double column
    pub fn double(values: Vec<Option<f64>>) -> Self {
        Self::from_data(ColumnData::Double(values))
    }

    /// Build a string column
    pub fn character(values: Vec<Option<String>>) -> Self {
        Self::from_data(ColumnData::Character(values))
    }

    /// Build a list column
    pub fn list(values: Vec<Value>) -> Self {
        Self::from_data(ColumnData::List(values))
    }

    /// Build a factor column from explicit levels and codes
    ///
    /// # Returns
    /// * `Err(TypeMismatch)` if a code does not index into `levels`
    pub fn factor(levels: Vec<String>, codes: Vec<Option<u32>>) -> ColbindResult<Self> {
        if let Some(bad) = codes.iter().flatten().find(|&&c| c as usize >= levels.len()) {
            return Err(ColbindError::TypeMismatch {
                expected: format!("factor with {} levels", levels.len()),
                found: format!("level code {}", bad),
            });
        }
        Ok(Self::from_data(ColumnData::Factor(FactorData { levels, codes })))
    }

    /// Build a factor column from labels; levels are the sorted distinct labels
    pub fn factor_from_labels<S: AsRef<str>>(labels: &[Option<S>]) -> Self {
        let mut levels: Vec<String> = labels
            .iter()
            .flatten()
            .map(|s| s.as_ref().to_string())
            .collect();
        levels.sort();
        levels.dedup();

        let codes = labels
            .iter()
            .map(|label| {
                label.as_ref().map(|s| {
                    // levels is sorted and holds every label
                    levels.binary_search_by(|l| l.as_str().cmp(s.as_ref())).unwrap_or(0) as u32
                })
            })
            .collect();

        Self::from_data(ColumnData::Factor(FactorData { levels, codes }))
    }

    /// Typed storage
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the column holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element type
    pub fn data_type(&self) -> DataType {
        self.data.data_type()
    }

    /// Human-readable type description used in error messages
    pub fn describe(&self) -> String {
        match self.data() {
            ColumnData::Factor(f) => format!("factor ({} levels)", f.levels.len()),
            other => other.data_type().name().to_string(),
        }
    }

    /// Whether two columns share the same underlying buffer
    pub fn shares_buffer(&self, other: &Column) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Whether the element at `row` is null
    pub fn is_null(&self, row: usize) -> bool {
        match self.data() {
            ColumnData::Logical(v) => v[row].is_none(),
            ColumnData::Integer(v) => v[row].is_none(),
            ColumnData::Double(v) => v[row].is_none(),
            ColumnData::Character(v) => v[row].is_none(),
            ColumnData::Factor(f) => f.codes[row].is_none(),
            ColumnData::List(v) => matches!(v[row], Value::Null),
        }
    }

    /// Dynamic view of the element at `row`
    ///
    /// Factor elements are returned as their label.
    pub fn value(&self, row: usize) -> Value {
        match self.data() {
            ColumnData::Logical(v) => v[row].map_or(Value::Null, Value::Boolean),
            ColumnData::Integer(v) => v[row].map_or(Value::Null, Value::Integer),
            ColumnData::Double(v) => v[row].map_or(Value::Null, Value::Double),
            ColumnData::Character(v) => v[row]
                .as_ref()
                .map_or(Value::Null, |s| Value::String(s.clone())),
            ColumnData::Factor(f) => f
                .label(row)
                .map_or(Value::Null, |s| Value::String(s.to_string())),
            ColumnData::List(v) => v[row].clone(),
        }
    }

    /// New column made of the elements at `indices`, in that order
    ///
    /// Indices may repeat; every index must be in bounds.
    pub fn take(&self, indices: &[usize]) -> Column {
        let data = match self.data() {
            ColumnData::Logical(v) => ColumnData::Logical(take_vec(v, indices)),
            ColumnData::Integer(v) => ColumnData::Integer(take_vec(v, indices)),
            ColumnData::Double(v) => ColumnData::Double(take_vec(v, indices)),
            ColumnData::Character(v) => ColumnData::Character(take_vec(v, indices)),
            ColumnData::Factor(f) => ColumnData::Factor(FactorData {
                levels: f.levels.clone(),
                codes: take_vec(&f.codes, indices),
            }),
            ColumnData::List(v) => ColumnData::List(take_vec(v, indices)),
        };
        Column::from_data(data)
    }
}
