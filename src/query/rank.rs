//! Ranking aggregates: per-group top-N and distinct-value frequencies.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::{column_index, AggregateColumns};
use crate::error::Result;
use crate::types::{DataSet, Value};

/// One row of a [`top_n_by_group`] result.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    /// The full source row.
    pub row: Vec<Value>,
    /// The group this entry was selected for.
    pub group: Value,
    /// The ranked value (the count column, as f64).
    pub value: f64,
    /// 1-based rank within the entry's group.
    pub rank_in_group: usize,
    /// Min-ranking position within the entire view: equal values share the
    /// lowest rank of the tied run, and the next distinct value's rank skips
    /// the tied slots.
    pub rank_overall: usize,
}

/// For each requested group, the top `n` rows by the count column, annotated
/// with within-group and overall ranks.
///
/// - Per-group ordering is a stable descending sort: tied values keep their
///   original relative order (first-seen wins), with no secondary key.
/// - `rank_overall` uses min-ranking over every rankable row of the view,
///   not just the requested groups.
/// - Rows whose count cell is null or non-numeric are not rankable and are
///   skipped entirely.
/// - The union is returned in descending value order. Groups with fewer than
///   `n` rankable rows contribute what they have; an empty view yields an
///   empty list (an empty chart is a meaningful outcome here).
pub fn top_n_by_group(
    dataset: &DataSet,
    columns: &AggregateColumns,
    groups: &[Value],
    n: usize,
) -> Result<Vec<RankedEntry>> {
    let value_idx = column_index(&dataset.schema, &columns.count)?;
    let group_idx = column_index(&dataset.schema, &columns.group)?;

    let rankable: Vec<(usize, f64)> = dataset
        .rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.get(value_idx)?.as_f64().map(|v| (i, v)))
        .collect();

    // Descending value list for min-rank lookup: the rank of v is one past
    // the number of strictly greater values.
    let mut sorted_desc: Vec<f64> = rankable.iter().map(|&(_, v)| v).collect();
    sorted_desc.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    let overall_rank = |v: f64| sorted_desc.partition_point(|&x| x > v) + 1;

    let mut out = Vec::new();
    for group in groups {
        let mut members: Vec<(usize, f64)> = rankable
            .iter()
            .copied()
            .filter(|&(i, _)| dataset.rows[i].get(group_idx) == Some(group))
            .collect();
        members.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        for (pos, (i, value)) in members.into_iter().take(n).enumerate() {
            out.push(RankedEntry {
                row: dataset.rows[i].clone(),
                group: group.clone(),
                value,
                rank_in_group: pos + 1,
                rank_overall: overall_rank(value),
            });
        }
    }

    out.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    Ok(out)
}

/// A distinct value and how many rows carry it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueCount {
    /// The distinct value.
    pub value: Value,
    /// Number of rows with this value.
    pub count: usize,
}

/// Frequency of each distinct non-null value in `column`, descending, ties
/// in first-seen order, truncated to the top `n` ("top 10 most reported side
/// effects").
pub fn top_value_counts(dataset: &DataSet, column: &str, n: usize) -> Result<Vec<ValueCount>> {
    let idx = column_index(&dataset.schema, column)?;

    let mut counts: Vec<ValueCount> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for row in &dataset.rows {
        let Some(value) = row.get(idx).filter(|v| !v.is_null()) else {
            continue;
        };
        let key = value.to_string();
        match positions.get(&key) {
            Some(&pos) => counts[pos].count += 1,
            None => {
                positions.insert(key, counts.len());
                counts.push(ValueCount {
                    value: value.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    Ok(counts)
}
