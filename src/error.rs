use thiserror::Error;

/// Convenience result type for load and query operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared by loading, predicate composition, and aggregation.
///
/// Configuration mistakes (`InvalidCriteria`, `MissingColumn`) are reported
/// before any row is visited. `NoData` is the explicit empty-result outcome
/// for lookups that the caller must branch on; it is never used where an
/// empty list is itself a meaningful answer.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input does not conform to the provided schema (missing required
    /// columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    Parse {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// Filter criteria are malformed (inverted age bounds, unknown enum label).
    #[error("invalid criteria: {message}")]
    InvalidCriteria { message: String },

    /// An active criterion or aggregate references a column the schema lacks.
    #[error("column '{column}' not found in schema")]
    MissingColumn { column: String },

    /// A lookup matched nothing; distinct from an empty-but-valid result.
    #[error("no data: {context}")]
    NoData { context: String },
}
