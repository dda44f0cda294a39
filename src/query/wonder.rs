//! One-hit-wonder detection and per-period summaries.

use std::collections::HashMap;

use super::{column_index, AggregateColumns};
use crate::error::{Error, Result};
use crate::types::{DataSet, Value};

/// Summed count for one (label, group) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct NameTotal {
    /// The label (e.g. a given name).
    pub label: String,
    /// The group the label was counted under.
    pub group: Value,
    /// Summed count column.
    pub total: i64,
}

/// Sum the count column per (label, group) pair, in first-seen order.
///
/// Rows with a null label, group, or count are skipped. This is the shared
/// building block of the frequency histogram and the one-hit-wonder summary.
pub fn name_totals(dataset: &DataSet, columns: &AggregateColumns) -> Result<Vec<NameTotal>> {
    let label_idx = column_index(&dataset.schema, &columns.label)?;
    let group_idx = column_index(&dataset.schema, &columns.group)?;
    let count_idx = column_index(&dataset.schema, &columns.count)?;

    let mut totals: Vec<NameTotal> = Vec::new();
    let mut positions: HashMap<(String, String), usize> = HashMap::new();
    for row in &dataset.rows {
        let Some(label) = row.get(label_idx).and_then(Value::as_str) else {
            continue;
        };
        let Some(group) = row.get(group_idx).filter(|g| !g.is_null()) else {
            continue;
        };
        let Some(count) = row.get(count_idx).and_then(Value::as_i64) else {
            continue;
        };

        let key = (label.to_string(), group.to_string());
        match positions.get(&key) {
            Some(&pos) => totals[pos].total += count,
            None => {
                positions.insert(key, totals.len());
                totals.push(NameTotal {
                    label: label.to_string(),
                    group: group.clone(),
                    total: count,
                });
            }
        }
    }
    Ok(totals)
}

/// Rows whose (label, group) pair occurs in exactly one distinct period.
///
/// The output keeps the input schema and row order, so it can be fed straight
/// back into [`one_hit_wonder_summary`] or any other aggregate.
pub fn find_one_hit_wonders(dataset: &DataSet, columns: &AggregateColumns) -> Result<DataSet> {
    let label_idx = column_index(&dataset.schema, &columns.label)?;
    let group_idx = column_index(&dataset.schema, &columns.group)?;
    let period_idx = column_index(&dataset.schema, &columns.period)?;

    let mut periods: HashMap<(String, String), (i64, bool)> = HashMap::new();
    let keyed = |row: &[Value]| -> Option<((String, String), i64)> {
        let label = row.get(label_idx).and_then(Value::as_str)?;
        let group = row.get(group_idx).filter(|g| !g.is_null())?;
        let period = row.get(period_idx).and_then(Value::as_i64)?;
        Some(((label.to_string(), group.to_string()), period))
    };

    for row in &dataset.rows {
        let Some((key, period)) = keyed(row) else {
            continue;
        };
        periods
            .entry(key)
            .and_modify(|(first, single)| {
                if *first != period {
                    *single = false;
                }
            })
            .or_insert((period, true));
    }

    Ok(dataset.filter_rows(|row| {
        keyed(row).is_some_and(|(key, _)| periods.get(&key).is_some_and(|&(_, single)| single))
    }))
}

/// One group's slice of a [`OneHitWonderSummary`].
#[derive(Debug, Clone, PartialEq)]
pub struct GroupWonder {
    /// The group.
    pub group: Value,
    /// Number of one-hit-wonder rows in the period for this group.
    pub wonders: usize,
    /// The highest-summed-count label, or `None` when the group has no rows
    /// in the period (absent, not a crash). Ties keep the first-seen label.
    pub most_common: Option<NameTotal>,
}

/// Per-period one-hit-wonder summary.
#[derive(Debug, Clone, PartialEq)]
pub struct OneHitWonderSummary {
    /// The requested period.
    pub period: i64,
    /// One entry per requested group, in the requested order.
    pub groups: Vec<GroupWonder>,
}

/// Summarize a one-hit-wonder view for one period.
///
/// Restricts to rows whose period column equals `period`, then per requested
/// group reports the row count and the label with the highest summed count.
/// A period with no rows at all is [`Error::NoData`]; the caller branches to
/// a "no one-hit wonders found" message instead of rendering anything.
pub fn one_hit_wonder_summary(
    dataset: &DataSet,
    columns: &AggregateColumns,
    period: i64,
    groups: &[Value],
) -> Result<OneHitWonderSummary> {
    let period_idx = column_index(&dataset.schema, &columns.period)?;
    let group_idx = column_index(&dataset.schema, &columns.group)?;

    let in_period =
        dataset.filter_rows(|row| row.get(period_idx).and_then(Value::as_i64) == Some(period));
    if in_period.is_empty() {
        return Err(Error::NoData {
            context: format!("no records for period {period}"),
        });
    }

    let totals = name_totals(&in_period, columns)?;
    let group_entries = groups
        .iter()
        .map(|group| {
            let wonders = in_period
                .rows
                .iter()
                .filter(|row| row.get(group_idx) == Some(group))
                .count();
            // max_by_key keeps the last maximum; fold keeps the first-seen one.
            let most_common = totals
                .iter()
                .filter(|t| &t.group == group)
                .fold(None::<&NameTotal>, |best, t| match best {
                    Some(b) if b.total >= t.total => Some(b),
                    _ => Some(t),
                })
                .cloned();
            GroupWonder {
                group: group.clone(),
                wonders,
                most_common,
            }
        })
        .collect();

    Ok(OneHitWonderSummary {
        period,
        groups: group_entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Schema, Sex};

    fn names_dataset(rows: Vec<(&str, Sex, i64, i64)>) -> DataSet {
        let schema = Schema::new(vec![
            Field::new("name", DataType::Utf8),
            Field::new("sex", DataType::Sex),
            Field::new("year", DataType::Int64),
            Field::new("count", DataType::Int64),
        ]);
        let rows = rows
            .into_iter()
            .map(|(name, sex, year, count)| {
                vec![
                    Value::Utf8(name.to_string()),
                    Value::Sex(sex),
                    Value::Int64(year),
                    Value::Int64(count),
                ]
            })
            .collect();
        DataSet::new(schema, rows)
    }

    fn both_sexes() -> [Value; 2] {
        [Value::Sex(Sex::Male), Value::Sex(Sex::Female)]
    }

    #[test]
    fn summary_ignores_rows_outside_the_period() {
        let ds = names_dataset(vec![
            ("Mary", Sex::Female, 1977, 7),
            ("John", Sex::Male, 1977, 5),
            ("Mary", Sex::Female, 1978, 7),
        ]);
        let out =
            one_hit_wonder_summary(&ds, &AggregateColumns::default(), 1977, &both_sexes())
                .unwrap();

        assert_eq!(out.period, 1977);
        let male = &out.groups[0];
        let female = &out.groups[1];
        assert_eq!(
            male.most_common,
            Some(NameTotal {
                label: "John".to_string(),
                group: Value::Sex(Sex::Male),
                total: 5
            })
        );
        assert_eq!(
            female.most_common,
            Some(NameTotal {
                label: "Mary".to_string(),
                group: Value::Sex(Sex::Female),
                total: 7
            })
        );
        assert_eq!(male.wonders, 1);
        assert_eq!(female.wonders, 1);
    }

    #[test]
    fn empty_period_is_no_data() {
        let ds = names_dataset(vec![("Mary", Sex::Female, 1977, 7)]);
        let err =
            one_hit_wonder_summary(&ds, &AggregateColumns::default(), 1900, &both_sexes())
                .unwrap_err();
        assert!(matches!(err, Error::NoData { .. }));
    }

    #[test]
    fn group_with_no_rows_has_absent_most_common() {
        let ds = names_dataset(vec![("Mary", Sex::Female, 1977, 7)]);
        let out =
            one_hit_wonder_summary(&ds, &AggregateColumns::default(), 1977, &both_sexes())
                .unwrap();
        let male = &out.groups[0];
        assert_eq!(male.wonders, 0);
        assert_eq!(male.most_common, None);
    }

    #[test]
    fn most_common_tie_keeps_first_seen_label() {
        let ds = names_dataset(vec![
            ("Ann", Sex::Female, 1977, 4),
            ("Beth", Sex::Female, 1977, 4),
        ]);
        let out =
            one_hit_wonder_summary(&ds, &AggregateColumns::default(), 1977, &both_sexes())
                .unwrap();
        assert_eq!(
            out.groups[1].most_common.as_ref().unwrap().label,
            "Ann".to_string()
        );
    }

    #[test]
    fn find_one_hit_wonders_keeps_single_period_pairs_only() {
        let ds = names_dataset(vec![
            ("Mary", Sex::Female, 1977, 7),  // appears 1977 and 1978 -> out
            ("Fay", Sex::Female, 1977, 2),   // single period -> kept
            ("Mary", Sex::Female, 1978, 7),
            ("John", Sex::Male, 1977, 5),    // single period -> kept
            ("Fay", Sex::Male, 1950, 1),     // same name, other group -> kept
        ]);
        let wonders = find_one_hit_wonders(&ds, &AggregateColumns::default()).unwrap();
        let names: Vec<&str> = wonders
            .rows
            .iter()
            .map(|r| r[0].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Fay", "John", "Fay"]);
        assert_eq!(wonders.schema, ds.schema);
    }

    #[test]
    fn name_totals_sum_in_first_seen_order() {
        let ds = names_dataset(vec![
            ("Mary", Sex::Female, 1977, 7),
            ("John", Sex::Male, 1977, 5),
            ("Mary", Sex::Female, 1978, 3),
        ]);
        let totals = name_totals(&ds, &AggregateColumns::default()).unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].label, "Mary");
        assert_eq!(totals[0].total, 10);
        assert_eq!(totals[1].label, "John");
        assert_eq!(totals[1].total, 5);
    }
}
