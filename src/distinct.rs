//! Row deduplication

use log::debug;

use crate::engine::Engine;
use crate::error::ColbindResult;
use crate::table::Table;
use crate::visitor::{RowIndexSet, RowVisitors};

impl Engine {
    /// Keep the first occurrence of every distinct row
    ///
    /// Rows are compared on all columns. Retained rows keep their original
    /// relative order. On a grouped table each group keeps its retained rows;
    /// since duplicates share their grouping values, no group becomes empty.
    ///
    /// # Returns
    /// * `Ok(Table)` with the distinct rows
    /// * `Err(Interrupted)` if cancelled
    pub fn distinct_rows(&self, table: &Table) -> ColbindResult<Table> {
        let visitors = RowVisitors::for_table(table);
        let mut set = RowIndexSet::new(&visitors);

        let mut indices = Vec::new();
        for row in 0..table.row_count() {
            self.poll_interrupt(row)?;
            if set.insert(row) {
                indices.push(row);
            }
        }
        debug!(
            "distinct_rows: kept {} of {} rows",
            indices.len(),
            table.row_count()
        );

        let mut result = table.take(&indices);
        if let Some(groups) = table.groups() {
            let mut mapping = vec![None; table.row_count()];
            for (new, &old) in indices.iter().enumerate() {
                mapping[old] = Some(new);
            }
            result.set_groups(Some(groups.remap(&mapping)))?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Column, Value};
    use crate::error::ColbindError;
    use crate::interrupt::CancellationToken;

    fn letters(values: &[&str]) -> Table {
        Table::new(vec![(
            "x".to_string(),
            Column::character(values.iter().map(|s| Some(s.to_string())).collect()),
        )])
        .unwrap()
    }

    #[test]
    fn test_first_occurrence_wins() {
        let out = Engine::new()
            .distinct_rows(&letters(&["A", "B", "A", "C", "B"]))
            .unwrap();
        let kept: Vec<Value> = (0..out.row_count()).map(|i| out.columns()[0].value(i)).collect();
        assert_eq!(
            kept,
            vec![
                Value::String("A".into()),
                Value::String("B".into()),
                Value::String("C".into())
            ]
        );
    }

    #[test]
    fn test_full_row_equality() {
        let table = Table::new(vec![
            ("a".to_string(), Column::integer(vec![Some(1), Some(1), Some(1)])),
            ("b".to_string(), Column::double(vec![Some(1.0), Some(2.0), Some(1.0)])),
        ])
        .unwrap();
        let out = Engine::new().distinct_rows(&table).unwrap();
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.row(1), vec![Value::Integer(1), Value::Double(2.0)]);
    }

    #[test]
    fn test_interrupted_mid_scan() {
        let token = CancellationToken::new();
        token.cancel();
        let engine = Engine::new()
            .with_cancellation(token)
            .with_check_interval(1);
        let result = engine.distinct_rows(&letters(&["A", "B"]));
        assert!(matches!(result, Err(ColbindError::Interrupted)));
    }
}
