//! Collecter module for colbind
//!
//! A collecter accumulates one output column across several source columns.
//! It is created with the final length of the column, every row starts out
//! null, and sources are copied into caller-supplied row ranges.
//!
//! The set of element types is closed, so a collecter is a plain enum over
//! typed buffers. Type unification works on a small lattice:
//!
//! - logical < integer < double
//! - factor < character
//! - factor(A) accepts factor(B) when B is a subset of A; otherwise it
//!   widens to factor(A followed by the new levels of B)
//! - list only meets list
//!
//! A logical column holding nothing but nulls carries no type: it can be
//! copied into any collecter, and a collecter that has only seen such
//! columns adopts the type of the next source.
//!
//! The resulting type and factor level set do not depend on input order.
//! Factor level order does: levels keep the order of first appearance.
//! Integers widened to double round above 2^53.
//!
//! `compatible` answers whether a source can be copied in as is, and
//! `can_promote` whether a wider collecter exists that can hold both what
//! was collected so far and the source.

use std::collections::HashMap;
use std::ops::Range;

use crate::column::{Column, ColumnData, DataType, FactorData, Value};
use crate::error::{ColbindError, ColbindResult};

/// Accumulator for one output column
#[derive(Debug, Clone)]
pub enum Collecter {
    /// Collecting booleans
    Logical(Vec<Option<bool>>),
    /// Collecting integers (accepts logical sources)
    Integer(Vec<Option<i64>>),
    /// Collecting doubles (accepts logical and integer sources)
    Double(Vec<Option<f64>>),
    /// Collecting strings (accepts factor sources as labels)
    Character(Vec<Option<String>>),
    /// Collecting factor codes against a level set
    Factor {
        /// Level set of the output column
        levels: Vec<String>,
        /// One code per output row
        codes: Vec<Option<u32>>,
    },
    /// Collecting list values
    List(Vec<Value>),
}

/// Whether `source` is a logical column with no non-null element
fn is_untyped_null(source: &Column) -> bool {
    match source.data() {
        ColumnData::Logical(v) => v.iter().all(Option::is_none),
        _ => false,
    }
}

/// Copy `len` produced values into `dst[rows]`
fn fill<T>(dst: &mut [T], rows: Range<usize>, mut produce: impl FnMut(usize) -> T) {
    for (offset, slot) in dst[rows].iter_mut().enumerate() {
        *slot = produce(offset);
    }
}

impl Collecter {
    /// Create an empty collecter of `n` rows matching the type of `source`
    ///
    /// Factor sources hand their level set to the new collecter.
    pub fn for_column(source: &Column, n: usize) -> Self {
        match source.data() {
            ColumnData::Factor(f) => Collecter::Factor {
                levels: f.levels.clone(),
                codes: vec![None; n],
            },
            other => Self::with_type(other.data_type(), n),
        }
    }

    /// Create an empty collecter of `n` rows for a given type
    ///
    /// A factor collecter created this way starts with no levels.
    pub fn with_type(data_type: DataType, n: usize) -> Self {
        match data_type {
            DataType::Logical => Collecter::Logical(vec![None; n]),
            DataType::Integer => Collecter::Integer(vec![None; n]),
            DataType::Double => Collecter::Double(vec![None; n]),
            DataType::Character => Collecter::Character(vec![None; n]),
            DataType::Factor => Collecter::Factor {
                levels: Vec::new(),
                codes: vec![None; n],
            },
            DataType::List => Collecter::List(vec![Value::Null; n]),
        }
    }

    /// Type currently being collected
    pub fn data_type(&self) -> DataType {
        match self {
            Collecter::Logical(_) => DataType::Logical,
            Collecter::Integer(_) => DataType::Integer,
            Collecter::Double(_) => DataType::Double,
            Collecter::Character(_) => DataType::Character,
            Collecter::Factor { .. } => DataType::Factor,
            Collecter::List(_) => DataType::List,
        }
    }

    /// Length of the output column
    pub fn len(&self) -> usize {
        match self {
            Collecter::Logical(v) => v.len(),
            Collecter::Integer(v) => v.len(),
            Collecter::Double(v) => v.len(),
            Collecter::Character(v) => v.len(),
            Collecter::Factor { codes, .. } => codes.len(),
            Collecter::List(v) => v.len(),
        }
    }

    /// Whether the output column has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable description of the collected type
    pub fn describe(&self) -> String {
        match self {
            Collecter::Factor { levels, .. } => format!("factor ({} levels)", levels.len()),
            other => other.data_type().name().to_string(),
        }
    }

    /// Whether `source` can be collected without changing the output type
    pub fn compatible(&self, source: &Column) -> bool {
        if is_untyped_null(source) {
            return true;
        }
        match (self, source.data()) {
            (Collecter::Logical(_), ColumnData::Logical(_)) => true,
            (Collecter::Integer(_), ColumnData::Logical(_) | ColumnData::Integer(_)) => true,
            (
                Collecter::Double(_),
                ColumnData::Logical(_) | ColumnData::Integer(_) | ColumnData::Double(_),
            ) => true,
            (Collecter::Character(_), ColumnData::Character(_) | ColumnData::Factor(_)) => true,
            (Collecter::Factor { levels, .. }, ColumnData::Factor(f)) => {
                f.levels.iter().all(|level| levels.contains(level))
            }
            (Collecter::List(_), ColumnData::List(_)) => true,
            _ => false,
        }
    }

    /// Whether a wider collecter can hold both the current output and `source`
    pub fn can_promote(&self, source: &Column) -> bool {
        self.promoted(source).is_some()
    }

    /// Create the empty, wider collecter covering the current output and `source`
    ///
    /// The new collecter has the same length as this one. Nothing is copied:
    /// the caller replays what was collected so far.
    ///
    /// # Returns
    /// * `Err(TypeMismatch)` if no such collecter exists
    pub fn promote(&self, source: &Column) -> ColbindResult<Collecter> {
        self.promoted(source).ok_or_else(|| ColbindError::TypeMismatch {
            expected: self.describe(),
            found: source.describe(),
        })
    }

    fn promoted(&self, source: &Column) -> Option<Collecter> {
        let n = self.len();
        match (self, source.data()) {
            (Collecter::Logical(v), _) if v.iter().all(Option::is_none) => {
                Some(Self::for_column(source, n))
            }
            (Collecter::Logical(_), ColumnData::Integer(_)) => {
                Some(Self::with_type(DataType::Integer, n))
            }
            (Collecter::Logical(_) | Collecter::Integer(_), ColumnData::Double(_)) => {
                Some(Self::with_type(DataType::Double, n))
            }
            (Collecter::Factor { levels, .. }, ColumnData::Factor(f)) if !self.compatible(source) => {
                let mut union = levels.clone();
                for level in &f.levels {
                    if !union.contains(level) {
                        union.push(level.clone());
                    }
                }
                Some(Collecter::Factor {
                    levels: union,
                    codes: vec![None; n],
                })
            }
            (Collecter::Factor { .. }, ColumnData::Character(_)) => {
                Some(Self::with_type(DataType::Character, n))
            }
            _ => None,
        }
    }

    /// Copy the first `rows.len()` values of `source` into `rows`
    ///
    /// # Returns
    /// * `Err(TypeMismatch)` if `source` is not compatible
    /// * `Err(LengthMismatch)` if the range does not fit the output or the source is too short
    pub fn collect(&mut self, rows: Range<usize>, source: &Column) -> ColbindResult<()> {
        if rows.end > self.len() || source.len() < rows.len() {
            return Err(ColbindError::LengthMismatch {
                column: format!("{} source", source.describe()),
                length: source.len(),
                expected: rows.len(),
            });
        }
        if !self.compatible(source) {
            return Err(ColbindError::TypeMismatch {
                expected: self.describe(),
                found: source.describe(),
            });
        }

        if is_untyped_null(source) {
            self.clear(rows);
            return Ok(());
        }

        match (self, source.data()) {
            (Collecter::Logical(dst), ColumnData::Logical(src)) => fill(dst, rows, |i| src[i]),
            (Collecter::Integer(dst), ColumnData::Logical(src)) => {
                fill(dst, rows, |i| src[i].map(i64::from))
            }
            (Collecter::Integer(dst), ColumnData::Integer(src)) => fill(dst, rows, |i| src[i]),
            (Collecter::Double(dst), ColumnData::Logical(src)) => {
                fill(dst, rows, |i| src[i].map(|b| if b { 1.0 } else { 0.0 }))
            }
            (Collecter::Double(dst), ColumnData::Integer(src)) => {
                fill(dst, rows, |i| src[i].map(|v| v as f64))
            }
            (Collecter::Double(dst), ColumnData::Double(src)) => fill(dst, rows, |i| src[i]),
            (Collecter::Character(dst), ColumnData::Character(src)) => {
                fill(dst, rows, |i| src[i].clone())
            }
            (Collecter::Character(dst), ColumnData::Factor(src)) => {
                fill(dst, rows, |i| src.label(i).map(str::to_string))
            }
            (Collecter::Factor { levels, codes }, ColumnData::Factor(src)) => {
                let recode = recode_levels(levels, src)?;
                fill(codes, rows, |i| src.codes[i].map(|c| recode[c as usize]))
            }
            (Collecter::List(dst), ColumnData::List(src)) => fill(dst, rows, |i| src[i].clone()),
            _ => unreachable!("compatibility checked above"),
        }
        Ok(())
    }

    /// Reset `rows` to null
    fn clear(&mut self, rows: Range<usize>) {
        match self {
            Collecter::Logical(v) => fill(v, rows, |_| None),
            Collecter::Integer(v) => fill(v, rows, |_| None),
            Collecter::Double(v) => fill(v, rows, |_| None),
            Collecter::Character(v) => fill(v, rows, |_| None),
            Collecter::Factor { codes, .. } => fill(codes, rows, |_| None),
            Collecter::List(v) => fill(v, rows, |_| Value::Null),
        }
    }

    /// Yield the finished column
    ///
    /// Rows never written by `collect` are null.
    pub fn into_column(self) -> Column {
        let data = match self {
            Collecter::Logical(v) => ColumnData::Logical(v),
            Collecter::Integer(v) => ColumnData::Integer(v),
            Collecter::Double(v) => ColumnData::Double(v),
            Collecter::Character(v) => ColumnData::Character(v),
            Collecter::Factor { levels, codes } => ColumnData::Factor(FactorData { levels, codes }),
            Collecter::List(v) => ColumnData::List(v),
        };
        Column::from_data(data)
    }
}

/// Map each source level code to the matching code in `levels`
fn recode_levels(levels: &[String], source: &FactorData) -> ColbindResult<Vec<u32>> {
    let positions: HashMap<&str, u32> = levels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i as u32))
        .collect();
    source
        .levels
        .iter()
        .map(|level| {
            positions
                .get(level.as_str())
                .copied()
                .ok_or_else(|| ColbindError::TypeMismatch {
                    expected: format!("factor ({} levels)", levels.len()),
                    found: format!("factor level '{}'", level),
                })
        })
        .collect()
}
