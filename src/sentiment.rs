//! Sentiment annotation.
//!
//! The polarity scoring algorithm itself is an external collaborator; this
//! module only defines the total classification interface the query layer
//! consumes, plus adapters for plugging a scorer (or a test double) in.
//!
//! Classification happens once, at load time: [`annotate`] stamps a
//! `sentiment` column onto the dataset so every subsequent query reads a
//! pre-computed per-row attribute instead of re-scoring text.
//!
//! ```
//! use tablequery::sentiment::{annotate, PolarityClassifier};
//! use tablequery::types::{DataSet, DataType, Field, Schema, Sentiment, Value};
//!
//! let schema = Schema::new(vec![Field::new("review_text", DataType::Utf8)]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Utf8("works great".to_string())],
//!         vec![Value::Null],
//!     ],
//! );
//!
//! // Any external `&str -> f64` polarity scorer slots in here.
//! let classifier = PolarityClassifier::new(|text: &str| {
//!     if text.contains("great") { 0.8 } else { 0.0 }
//! });
//! let annotated = annotate(&ds, "review_text", &classifier).unwrap();
//!
//! assert_eq!(annotated.rows[0][1], Value::Sentiment(Sentiment::Positive));
//! assert_eq!(annotated.rows[1][1], Value::Sentiment(Sentiment::Neutral));
//! ```

use crate::error::{Error, Result};
use crate::types::{DataSet, DataType, Field, Sentiment, Value};

/// Name of the column [`annotate`] writes.
pub const SENTIMENT_COLUMN: &str = "sentiment";

/// A total three-bucket classifier over optional free text.
///
/// Implementations must be defined for every input: no errors, no panics, and
/// absent/empty/whitespace-only text always maps to [`Sentiment::Neutral`].
pub trait SentimentClassifier {
    /// Classify a piece of text.
    fn classify(&self, text: Option<&str>) -> Sentiment;
}

/// Buckets an external polarity score into {positive, neutral, negative}.
///
/// The score function is the black box (e.g. an off-the-shelf lexicon
/// polarity model); this adapter only applies the cutoffs. A score that is
/// NaN classifies as neutral so the contract stays total.
pub struct PolarityClassifier<S> {
    score: S,
    positive_at: f64,
    negative_at: f64,
}

impl<S> PolarityClassifier<S>
where
    S: Fn(&str) -> f64,
{
    /// Wrap a polarity scorer with the default cutoffs (`>= 0.05` positive,
    /// `<= -0.05` negative).
    pub fn new(score: S) -> Self {
        Self {
            score,
            positive_at: 0.05,
            negative_at: -0.05,
        }
    }

    /// Override the positive/negative cutoffs.
    pub fn with_cutoffs(mut self, positive_at: f64, negative_at: f64) -> Self {
        self.positive_at = positive_at;
        self.negative_at = negative_at;
        self
    }
}

impl<S> SentimentClassifier for PolarityClassifier<S>
where
    S: Fn(&str) -> f64,
{
    fn classify(&self, text: Option<&str>) -> Sentiment {
        let text = match text {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Sentiment::Neutral,
        };
        let score = (self.score)(text);
        if score >= self.positive_at {
            Sentiment::Positive
        } else if score <= self.negative_at {
            Sentiment::Negative
        } else {
            // Covers the neutral band and NaN.
            Sentiment::Neutral
        }
    }
}

/// Adapter for an arbitrary classification closure.
///
/// Useful as a test double; the closure is still expected to honor the
/// absent-text-is-neutral rule.
pub struct FnClassifier<F>(F);

impl<F> FnClassifier<F>
where
    F: Fn(Option<&str>) -> Sentiment,
{
    /// Wrap a closure as a classifier.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> SentimentClassifier for FnClassifier<F>
where
    F: Fn(Option<&str>) -> Sentiment,
{
    fn classify(&self, text: Option<&str>) -> Sentiment {
        (self.0)(text)
    }
}

/// Stamp a [`SENTIMENT_COLUMN`] onto `dataset` by classifying `text_field`
/// row by row.
///
/// - Appends the column if absent, replaces its values if already present
///   (re-annotation is idempotent).
/// - Rows whose text cell is null or not text classify as if the text were
///   absent.
/// - Returns [`Error::MissingColumn`] if `text_field` is not in the schema.
pub fn annotate<C>(dataset: &DataSet, text_field: &str, classifier: &C) -> Result<DataSet>
where
    C: SentimentClassifier + ?Sized,
{
    let text_idx = dataset
        .schema
        .index_of(text_field)
        .ok_or_else(|| Error::MissingColumn {
            column: text_field.to_string(),
        })?;
    let existing = dataset.schema.index_of(SENTIMENT_COLUMN);

    let mut schema = dataset.schema.clone();
    if existing.is_none() {
        schema
            .fields
            .push(Field::new(SENTIMENT_COLUMN, DataType::Sentiment));
    }

    let rows = dataset
        .rows
        .iter()
        .map(|row| {
            let class = classifier.classify(row.get(text_idx).and_then(Value::as_str));
            let mut out = row.clone();
            match existing {
                Some(idx) => out[idx] = Value::Sentiment(class),
                None => out.push(Value::Sentiment(class)),
            }
            out
        })
        .collect();

    Ok(DataSet::new(schema, rows))
}
