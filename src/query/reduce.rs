//! Single-column reductions.
//!
//! Callers use these to seed criteria widgets from the data itself: the age
//! slider's bounds are `Min`/`Max` over the age column of the full table.

use crate::types::{DataSet, DataType, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows (including nulls).
    Count,
    /// Sum numeric values, ignoring nulls.
    Sum,
    /// Minimum numeric value, ignoring nulls.
    Min,
    /// Maximum numeric value, ignoring nulls.
    Max,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist in the schema.
/// - For `Sum`/`Min`/`Max`, returns `Some(Value::Null)` if the column is not
///   numeric or holds no non-null values.
/// - For `Count`, always returns `Some(Value::Int64(row_count))`.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    let idx = dataset.schema.index_of(column)?;
    if op == ReduceOp::Count {
        return Some(Value::Int64(dataset.row_count() as i64));
    }

    match dataset.schema.fields[idx].data_type {
        DataType::Int64 => {
            let vals = dataset.rows.iter().filter_map(|r| r.get(idx)?.as_i64());
            let acc = match op {
                ReduceOp::Sum => Some(vals.sum()),
                ReduceOp::Min => vals.min(),
                ReduceOp::Max => vals.max(),
                ReduceOp::Count => unreachable!("handled above"),
            };
            // An Int64 column with zero non-null values still sums to 0; report
            // Null instead so "no data" stays distinguishable.
            let any = dataset
                .rows
                .iter()
                .any(|r| r.get(idx).is_some_and(|v| v.as_i64().is_some()));
            Some(if any {
                acc.map(Value::Int64).unwrap_or(Value::Null)
            } else {
                Value::Null
            })
        }
        DataType::Float64 => {
            let mut acc: Option<f64> = None;
            for v in dataset.rows.iter().filter_map(|r| r.get(idx)?.as_f64()) {
                acc = Some(match (op, acc) {
                    (ReduceOp::Sum, Some(a)) => a + v,
                    (ReduceOp::Min, Some(a)) => a.min(v),
                    (ReduceOp::Max, Some(a)) => a.max(v),
                    (_, None) => v,
                    (ReduceOp::Count, _) => unreachable!("handled above"),
                });
            }
            Some(acc.map(Value::Float64).unwrap_or(Value::Null))
        }
        _ => Some(Value::Null),
    }
}
