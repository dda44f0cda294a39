//! Share-of-total aggregates: per-period trend ratios, all-time balance, and
//! unique-label percentages.
//!
//! A zero denominator is always reported as an absent share (`None`), never a
//! NaN, never a silent 0, and never a fault.

use std::collections::BTreeMap;

use super::{column_index, AggregateColumns};
use crate::error::{Error, Result};
use crate::types::{DataSet, Value};

/// Per-period counts and shares for a fixed group domain.
///
/// `counts` and `shares` are positionally aligned with the `groups` slice the
/// query was called with; groups missing from a period are zero-filled.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodRatios {
    /// The period (e.g. year).
    pub period: i64,
    /// Summed count per group, zero-filled.
    pub counts: Vec<i64>,
    /// Sum of `counts`.
    pub total: i64,
    /// Each group's share of `total`; `None` for every group when the
    /// period's total is 0.
    pub shares: Vec<Option<f64>>,
}

/// Period-by-period group shares for one label ("name trend").
///
/// Restricts the view to rows whose label column equals `label_key`, sums the
/// count column per (period, group), and computes each group's share of the
/// period total. Periods are returned ascending.
///
/// Rows whose period or count cell is null/non-numeric, or whose group is not
/// in `groups`, are ignored. If no row matches `label_key` at all, this is
/// [`Error::NoData`]; the caller shows "name not found", not an empty chart.
pub fn yearly_group_ratio(
    dataset: &DataSet,
    columns: &AggregateColumns,
    label_key: &str,
    groups: &[Value],
) -> Result<Vec<PeriodRatios>> {
    let label_idx = column_index(&dataset.schema, &columns.label)?;
    let group_idx = column_index(&dataset.schema, &columns.group)?;
    let period_idx = column_index(&dataset.schema, &columns.period)?;
    let count_idx = column_index(&dataset.schema, &columns.count)?;

    let mut by_period: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    let mut matched = false;
    for row in &dataset.rows {
        if row.get(label_idx).and_then(Value::as_str) != Some(label_key) {
            continue;
        }
        matched = true;
        let (Some(period), Some(count)) = (
            row.get(period_idx).and_then(Value::as_i64),
            row.get(count_idx).and_then(Value::as_i64),
        ) else {
            continue;
        };
        let Some(group_pos) = groups.iter().position(|g| row.get(group_idx) == Some(g)) else {
            continue;
        };
        by_period.entry(period).or_insert_with(|| vec![0; groups.len()])[group_pos] += count;
    }

    if !matched {
        return Err(Error::NoData {
            context: format!("label '{label_key}' not present in view"),
        });
    }

    Ok(by_period
        .into_iter()
        .map(|(period, counts)| {
            let total: i64 = counts.iter().sum();
            let shares = counts
                .iter()
                .map(|&c| (total > 0).then(|| c as f64 / total as f64))
                .collect();
            PeriodRatios {
                period,
                counts,
                total,
                shares,
            }
        })
        .collect())
}

/// A group's all-time count and share for one label.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupShare {
    /// The group.
    pub group: Value,
    /// Summed count across the whole view.
    pub count: i64,
    /// Share of the across-groups total; `None` when that total is 0.
    pub share: Option<f64>,
}

/// All-time per-group balance for one label ("sex balance" bar).
///
/// Same matching and degradation rules as [`yearly_group_ratio`], collapsed
/// over periods.
pub fn group_share(
    dataset: &DataSet,
    columns: &AggregateColumns,
    label_key: &str,
    groups: &[Value],
) -> Result<Vec<GroupShare>> {
    let label_idx = column_index(&dataset.schema, &columns.label)?;
    let group_idx = column_index(&dataset.schema, &columns.group)?;
    let count_idx = column_index(&dataset.schema, &columns.count)?;

    let mut counts = vec![0i64; groups.len()];
    let mut matched = false;
    for row in &dataset.rows {
        if row.get(label_idx).and_then(Value::as_str) != Some(label_key) {
            continue;
        }
        matched = true;
        let Some(count) = row.get(count_idx).and_then(Value::as_i64) else {
            continue;
        };
        if let Some(pos) = groups.iter().position(|g| row.get(group_idx) == Some(g)) {
            counts[pos] += count;
        }
    }

    if !matched {
        return Err(Error::NoData {
            context: format!("label '{label_key}' not present in view"),
        });
    }

    let total: i64 = counts.iter().sum();
    Ok(groups
        .iter()
        .zip(counts)
        .map(|(group, count)| GroupShare {
            group: group.clone(),
            count,
            share: (total > 0).then(|| count as f64 / total as f64),
        })
        .collect())
}

/// Unique-label statistics for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueNameStats {
    /// The group.
    pub group: Value,
    /// Summed count column for the group.
    pub total_count: i64,
    /// Number of distinct labels in the group.
    pub unique_names: usize,
    /// `unique_names / total_count * 100`; `None` when `total_count` is 0.
    pub percent_unique: Option<f64>,
}

/// Per group: distinct label count, summed count, and the percentage of
/// occurrences that were unique labels.
pub fn unique_name_ratio(
    dataset: &DataSet,
    columns: &AggregateColumns,
    groups: &[Value],
) -> Result<Vec<UniqueNameStats>> {
    let label_idx = column_index(&dataset.schema, &columns.label)?;
    let group_idx = column_index(&dataset.schema, &columns.group)?;
    let count_idx = column_index(&dataset.schema, &columns.count)?;

    Ok(groups
        .iter()
        .map(|group| {
            let mut total = 0i64;
            let mut labels = std::collections::BTreeSet::new();
            for row in &dataset.rows {
                if row.get(group_idx) != Some(group) {
                    continue;
                }
                if let Some(count) = row.get(count_idx).and_then(Value::as_i64) {
                    total += count;
                }
                if let Some(label) = row.get(label_idx).and_then(Value::as_str) {
                    labels.insert(label.to_string());
                }
            }
            UniqueNameStats {
                group: group.clone(),
                total_count: total,
                unique_names: labels.len(),
                percent_unique: (total > 0).then(|| labels.len() as f64 / total as f64 * 100.0),
            }
        })
        .collect())
}
