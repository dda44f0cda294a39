//! Filter criteria and predicate composition.
//!
//! [`FilterCriteria`] is a plain value object: every dimension is
//! independently optional, and the default value matches everything. Sidebar
//! state never leaks in as globals; callers build a criteria value per
//! interaction and pass it down.
//!
//! [`FilterCriteria::compose`] resolves the criteria against a schema once,
//! producing a [`RowPredicate`] that AND-combines one sub-predicate per
//! active dimension. Malformed criteria (inverted age bounds, unknown enum
//! labels via `FromStr`) and missing columns are rejected here, before any
//! row is visited.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::column_index;
use crate::error::{Error, Result};
use crate::types::{Schema, Sentiment, Sex, Value};

/// Tri-state severity selection.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum SeverityFilter {
    /// No restriction.
    #[default]
    Any,
    /// Only records with the serious flag set.
    SeriousOnly,
    /// Only records with the serious flag cleared.
    NonSeriousOnly,
}

impl FromStr for SeverityFilter {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" | "all" => Ok(SeverityFilter::Any),
            "serious" | "serious-only" => Ok(SeverityFilter::SeriousOnly),
            "non-serious" | "nonserious" | "non-serious-only" => Ok(SeverityFilter::NonSeriousOnly),
            other => Err(Error::InvalidCriteria {
                message: format!("unknown severity '{other}' (expected any/serious/non-serious)"),
            }),
        }
    }
}

/// Names of the columns each filter dimension reads.
///
/// Defaults match the adverse-event dataset; override individual fields for
/// other schemas (e.g. `text: "review_text"` for the reviews dataset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnBindings {
    /// Numeric age column.
    pub age: String,
    /// Canonical sex column.
    pub sex: String,
    /// Boolean seriousness column.
    pub serious: String,
    /// Free-text column searched by the keyword filter.
    pub text: String,
    /// Pre-computed sentiment column (see [`crate::sentiment::annotate`]).
    pub sentiment: String,
}

impl Default for ColumnBindings {
    fn default() -> Self {
        Self {
            age: "patient_age".to_string(),
            sex: "patient_sex".to_string(),
            serious: "serious".to_string(),
            text: "reaction_meddra".to_string(),
            sentiment: crate::sentiment::SENTIMENT_COLUMN.to_string(),
        }
    }
}

/// Independently-optional row selection criteria.
///
/// An unset dimension does not filter. For `allowed_sexes`, an empty set and
/// a set containing every variant both mean "no restriction": dimensions that
/// default to all-selected in a UI must not silently return zero rows when
/// nothing (or everything) is ticked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Inclusive lower age bound.
    pub age_min: Option<f64>,
    /// Inclusive upper age bound.
    pub age_max: Option<f64>,
    /// Sexes to keep; empty or all-variants = no restriction.
    pub allowed_sexes: BTreeSet<Sex>,
    /// Severity tri-state.
    pub severity: SeverityFilter,
    /// Case-insensitive substring match on the text column.
    pub keyword: Option<String>,
    /// Keep only rows with this sentiment class.
    pub sentiment: Option<Sentiment>,
}

impl FilterCriteria {
    /// Set both inclusive age bounds.
    pub fn with_age_range(mut self, min: f64, max: f64) -> Self {
        self.age_min = Some(min);
        self.age_max = Some(max);
        self
    }

    /// Restrict to the given sexes.
    pub fn with_sexes(mut self, sexes: impl IntoIterator<Item = Sex>) -> Self {
        self.allowed_sexes = sexes.into_iter().collect();
        self
    }

    /// Set the severity tri-state.
    pub fn with_severity(mut self, severity: SeverityFilter) -> Self {
        self.severity = severity;
        self
    }

    /// Set the keyword filter.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Restrict to one sentiment class.
    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    /// Whether no dimension is active.
    pub fn is_unrestricted(&self) -> bool {
        self.age_min.is_none()
            && self.age_max.is_none()
            && (self.allowed_sexes.is_empty() || self.allowed_sexes.len() == Sex::ALL.len())
            && self.severity == SeverityFilter::Any
            && self.keyword.as_deref().is_none_or(str::is_empty)
            && self.sentiment.is_none()
    }

    /// Resolve these criteria against `schema` into a [`RowPredicate`].
    ///
    /// Fails fast with [`Error::InvalidCriteria`] on inverted or NaN age
    /// bounds, and [`Error::MissingColumn`] when an active dimension's bound
    /// column is absent from the schema. Columns for inactive dimensions are
    /// not required.
    pub fn compose(&self, schema: &Schema, columns: &ColumnBindings) -> Result<RowPredicate> {
        if self.age_min.is_some_and(f64::is_nan) || self.age_max.is_some_and(f64::is_nan) {
            return Err(Error::InvalidCriteria {
                message: "age bound is NaN".to_string(),
            });
        }
        if let (Some(lo), Some(hi)) = (self.age_min, self.age_max) {
            if lo > hi {
                return Err(Error::InvalidCriteria {
                    message: format!("age_min ({lo}) exceeds age_max ({hi})"),
                });
            }
        }

        let mut preds: Vec<SubPredicate> = Vec::new();

        if self.age_min.is_some() || self.age_max.is_some() {
            let idx = column_index(schema, &columns.age)?;
            let (lo, hi) = (self.age_min, self.age_max);
            // Null or non-numeric age never matches an age-bounded query.
            preds.push(Box::new(move |row| {
                match row.get(idx).and_then(Value::as_f64) {
                    Some(age) => {
                        lo.is_none_or(|l| age >= l) && hi.is_none_or(|h| age <= h)
                    }
                    None => false,
                }
            }));
        }

        if !self.allowed_sexes.is_empty() && self.allowed_sexes.len() < Sex::ALL.len() {
            let idx = column_index(schema, &columns.sex)?;
            let allowed = self.allowed_sexes.clone();
            preds.push(Box::new(move |row| {
                matches!(row.get(idx), Some(Value::Sex(s)) if allowed.contains(s))
            }));
        }

        if self.severity != SeverityFilter::Any {
            let idx = column_index(schema, &columns.serious)?;
            let want = self.severity == SeverityFilter::SeriousOnly;
            preds.push(Box::new(move |row| {
                matches!(row.get(idx), Some(Value::Bool(b)) if *b == want)
            }));
        }

        if let Some(keyword) = self.keyword.as_deref().filter(|k| !k.is_empty()) {
            let idx = column_index(schema, &columns.text)?;
            let needle = keyword.to_lowercase();
            preds.push(Box::new(move |row| {
                row.get(idx)
                    .and_then(Value::as_str)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            }));
        }

        if let Some(want) = self.sentiment {
            let idx = column_index(schema, &columns.sentiment)?;
            preds.push(Box::new(move |row| {
                matches!(row.get(idx), Some(Value::Sentiment(s)) if *s == want)
            }));
        }

        Ok(RowPredicate { preds })
    }
}

type SubPredicate = Box<dyn Fn(&[Value]) -> bool + Send + Sync>;

/// A composed pure row test: the AND of one sub-predicate per active
/// criteria dimension.
pub struct RowPredicate {
    preds: Vec<SubPredicate>,
}

impl RowPredicate {
    /// Whether `row` satisfies every active sub-predicate.
    pub fn matches(&self, row: &[Value]) -> bool {
        self.preds.iter().all(|p| p(row))
    }

    /// Whether this predicate accepts every row (no active dimension).
    pub fn is_unrestricted(&self) -> bool {
        self.preds.is_empty()
    }
}

impl fmt::Debug for RowPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowPredicate")
            .field("active_dimensions", &self.preds.len())
            .finish()
    }
}
