//! `tablequery` is a small library implementing the query core shared by a
//! family of interactive tabular data explorers: load a delimited file into
//! an immutable in-memory [`types::DataSet`], compose explicit
//! [`query::FilterCriteria`] into a row predicate, filter through a single
//! chokepoint, and run rank/ratio/lookup aggregates over the resulting view.
//!
//! There is deliberately no state in here: every query is a pure function of
//! (table, criteria). The table is loaded once per process and only ever
//! read afterwards; filtered views are new datasets, never in-place edits.
//!
//! ## What's provided
//!
//! - **Loading** ([`load`]): header-matched, schema-typed CSV/TSV reading
//!   with per-value parse errors, lenient null-coercion for dirty numeric
//!   columns, optional load observers, and CSV export of any view.
//! - **Criteria** ([`query::FilterCriteria`]): independently-optional age
//!   range, sex set, severity tri-state, case-insensitive keyword, and
//!   sentiment class; composed (fail-fast) into one [`query::RowPredicate`].
//! - **Aggregates** ([`query`]): min-ranked per-group top-N, distinct-value
//!   frequencies, per-period group ratios, all-time group balance,
//!   one-hit-wonder detection and summaries, unique-name percentages, and
//!   single-column reductions for seeding criteria widgets.
//! - **Sentiment annotation** ([`sentiment`]): a total classifier interface
//!   plus adapters; the polarity scorer itself stays an external black box.
//!
//! ## Quick example: criteria in, filtered view and aggregate out
//!
//! ```
//! use tablequery::query::{filter, top_value_counts, ColumnBindings, FilterCriteria, SeverityFilter};
//! use tablequery::types::{DataSet, DataType, Field, Schema, Sex, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::lenient("patient_age", DataType::Float64),
//!     Field::new("patient_sex", DataType::Sex),
//!     Field::new("serious", DataType::Bool),
//!     Field::new("reaction_meddra", DataType::Utf8),
//! ]);
//! let row = |age: f64, sex, serious, reaction: &str| {
//!     vec![
//!         Value::Float64(age),
//!         Value::Sex(sex),
//!         Value::Bool(serious),
//!         Value::Utf8(reaction.to_string()),
//!     ]
//! };
//! let table = DataSet::new(
//!     schema,
//!     vec![
//!         row(34.0, Sex::Male, true, "Nausea"),
//!         row(52.0, Sex::Female, false, "Headache"),
//!         row(47.0, Sex::Female, true, "Nausea"),
//!     ],
//! );
//!
//! let criteria = FilterCriteria::default()
//!     .with_age_range(30.0, 60.0)
//!     .with_severity(SeverityFilter::SeriousOnly);
//! let predicate = criteria.compose(&table.schema, &ColumnBindings::default())?;
//!
//! let view = filter(&table, &predicate);
//! assert_eq!(view.row_count(), 2);
//!
//! let top = top_value_counts(&view, "reaction_meddra", 10)?;
//! assert_eq!(top[0].value, Value::Utf8("Nausea".to_string()));
//! assert_eq!(top[0].count, 2);
//! # Ok::<(), tablequery::Error>(())
//! ```
//!
//! ## Loading from disk
//!
//! ```no_run
//! use tablequery::load::{load_from_path, LoadOptions};
//! use tablequery::types::{DataType, Field, Schema};
//!
//! # fn main() -> tablequery::Result<()> {
//! let schema = Schema::new(vec![
//!     Field::lenient("patient_age", DataType::Float64),
//!     Field::new("patient_sex", DataType::Sex),
//!     Field::new("serious", DataType::Bool),
//!     Field::new("reaction_meddra", DataType::Utf8),
//! ]);
//! let table = load_from_path("adverse_events.csv", &schema, &LoadOptions::default())?;
//! println!("rows={}", table.row_count());
//! # Ok(())
//! # }
//! ```
//!
//! Sex columns are normalized at load time: `"M"`, `"Male"` and `1` all
//! parse to the same [`types::Sex::Male`] variant, so predicates never
//! branch on source encoding.
//!
//! ## Modules
//!
//! - [`load`]: delimited-file reading, CSV export, load observability
//! - [`types`]: schema + in-memory dataset types and canonical categoricals
//! - [`query`]: criteria, the filter chokepoint, and the aggregates
//! - [`sentiment`]: classifier interface and load-time annotation
//! - [`error`]: the crate-wide error type

pub mod error;
pub mod load;
pub mod query;
pub mod sentiment;
pub mod types;

pub use error::{Error, Result};
