use tablequery::load::{load_from_path, LoadOptions};
use tablequery::query::{filter, ColumnBindings, FilterCriteria};
use tablequery::sentiment::{annotate, PolarityClassifier, SentimentClassifier, SENTIMENT_COLUMN};
use tablequery::types::{DataType, Field, Schema, Sentiment, Value};

/// Stand-in for the external polarity scorer: the library only ever sees the
/// resulting f64.
fn scorer(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let positives = ["great", "wonderful"].iter().filter(|w| lower.contains(*w)).count();
    let negatives = ["terrible", "nausea"].iter().filter(|w| lower.contains(*w)).count();
    (positives as f64 - negatives as f64) / 4.0
}

fn reviews_table() -> tablequery::types::DataSet {
    let schema = Schema::new(vec![Field::new("review_text", DataType::Utf8)]);
    load_from_path("tests/fixtures/reviews.csv", &schema, &LoadOptions::default()).unwrap()
}

#[test]
fn annotation_stamps_one_class_per_row_at_load_time() {
    let ds = reviews_table();
    let annotated = annotate(&ds, "review_text", &PolarityClassifier::new(scorer)).unwrap();

    let sentiment_idx = annotated.schema.index_of(SENTIMENT_COLUMN).unwrap();
    let classes: Vec<&Value> = annotated.rows.iter().map(|r| &r[sentiment_idx]).collect();
    assert_eq!(
        classes,
        vec![
            &Value::Sentiment(Sentiment::Positive),
            &Value::Sentiment(Sentiment::Negative),
            &Value::Sentiment(Sentiment::Neutral),
            // Empty text row classifies neutral, never errors.
            &Value::Sentiment(Sentiment::Neutral),
        ]
    );
}

#[test]
fn classifier_is_total_over_arbitrary_text() {
    let c = PolarityClassifier::new(scorer);
    assert_eq!(c.classify(None), Sentiment::Neutral);
    assert_eq!(c.classify(Some("")), Sentiment::Neutral);
    for text in ["\u{0}weird\u{7f}", "数字だけ", "!!!???", &"x".repeat(10_000)] {
        let _ = c.classify(Some(text));
    }
}

#[test]
fn sentiment_criteria_filter_the_annotated_view() {
    let ds = reviews_table();
    let annotated = annotate(&ds, "review_text", &PolarityClassifier::new(scorer)).unwrap();

    let bindings = ColumnBindings {
        text: "review_text".to_string(),
        ..Default::default()
    };
    let pred = FilterCriteria::default()
        .with_sentiment(Sentiment::Negative)
        .compose(&annotated.schema, &bindings)
        .unwrap();
    let view = filter(&annotated, &pred);

    assert_eq!(view.row_count(), 1);
    assert!(view.rows[0][0]
        .as_str()
        .unwrap()
        .starts_with("Terrible nausea"));
}

#[test]
fn keyword_and_sentiment_combine_on_reviews() {
    let ds = reviews_table();
    let annotated = annotate(&ds, "review_text", &PolarityClassifier::new(scorer)).unwrap();

    let bindings = ColumnBindings {
        text: "review_text".to_string(),
        ..Default::default()
    };
    // Case-insensitive: the fixture says "Terrible", the criteria "NAUSEA".
    let pred = FilterCriteria::default()
        .with_keyword("NAUSEA")
        .with_sentiment(Sentiment::Negative)
        .compose(&annotated.schema, &bindings)
        .unwrap();
    assert_eq!(filter(&annotated, &pred).row_count(), 1);
}
