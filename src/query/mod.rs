//! The query engine: one filter chokepoint plus the aggregates built on it.
//!
//! Every screen routes through the same two steps so no two charts can ever
//! disagree about what "the filtered data" means:
//!
//! 1. [`FilterCriteria::compose`] turns the user's selections into a single
//!    [`RowPredicate`] (fail-fast on malformed criteria).
//! 2. [`filter()`] applies it, producing an order-preserving view.
//!
//! Aggregates then run against the view. Everything here is a pure function
//! of (dataset, arguments): no caching, no shared state, recomputed from the
//! full in-memory table on every call.
//!
//! ## Example: filter then rank
//!
//! ```
//! use tablequery::query::{filter, top_n_by_group, AggregateColumns, FilterCriteria};
//! use tablequery::types::{DataSet, DataType, Field, Schema, Sex, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("name", DataType::Utf8),
//!     Field::new("sex", DataType::Sex),
//!     Field::new("year", DataType::Int64),
//!     Field::new("count", DataType::Int64),
//! ]);
//! let row = |name: &str, sex, year, count| {
//!     vec![
//!         Value::Utf8(name.to_string()),
//!         Value::Sex(sex),
//!         Value::Int64(year),
//!         Value::Int64(count),
//!     ]
//! };
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         row("Mary", Sex::Female, 2000, 90),
//!         row("John", Sex::Male, 2000, 80),
//!         row("Linda", Sex::Female, 2000, 40),
//!     ],
//! );
//!
//! // Unrestricted criteria: the view is the whole table, in order.
//! let pred = FilterCriteria::default()
//!     .compose(&ds.schema, &Default::default())
//!     .unwrap();
//! let view = filter(&ds, &pred);
//! assert_eq!(view.rows, ds.rows);
//!
//! let cols = AggregateColumns::default();
//! let top = top_n_by_group(&view, &cols, &[Value::Sex(Sex::Female)], 1).unwrap();
//! assert_eq!(top[0].row[0], Value::Utf8("Mary".to_string()));
//! assert_eq!(top[0].rank_overall, 1);
//! ```

pub mod criteria;
pub mod filter;
pub mod rank;
pub mod ratio;
pub mod reduce;
pub mod wonder;

pub use criteria::{ColumnBindings, FilterCriteria, RowPredicate, SeverityFilter};
pub use filter::filter;
pub use rank::{top_n_by_group, top_value_counts, RankedEntry, ValueCount};
pub use ratio::{
    group_share, unique_name_ratio, yearly_group_ratio, GroupShare, PeriodRatios, UniqueNameStats,
};
pub use reduce::{reduce, ReduceOp};
pub use wonder::{
    find_one_hit_wonders, name_totals, one_hit_wonder_summary, GroupWonder, NameTotal,
    OneHitWonderSummary,
};

use crate::error::{Error, Result};
use crate::types::Schema;

/// Column wiring for the label/group/period/count aggregates.
///
/// Defaults match the names dataset (`name`, `sex`, `year`, `count`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateColumns {
    /// Column holding the ranked/looked-up label (e.g. a given name).
    pub label: String,
    /// Column holding the group categorical (e.g. sex).
    pub group: String,
    /// Column holding the integer period (e.g. year).
    pub period: String,
    /// Column holding the per-row count.
    pub count: String,
}

impl Default for AggregateColumns {
    fn default() -> Self {
        Self {
            label: "name".to_string(),
            group: "sex".to_string(),
            period: "year".to_string(),
            count: "count".to_string(),
        }
    }
}

pub(crate) fn column_index(schema: &Schema, column: &str) -> Result<usize> {
    schema.index_of(column).ok_or_else(|| Error::MissingColumn {
        column: column.to_string(),
    })
}
