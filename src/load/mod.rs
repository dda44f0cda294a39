//! Loading entrypoints.
//!
//! Most callers should use [`load_from_path`], which:
//!
//! - reads a delimited file into an in-memory [`crate::types::DataSet`]
//!   against a caller-provided [`crate::types::Schema`]
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! The reader and the CSV export helpers are also available directly under
//! [`csv`]. Loading happens once per process; the resulting dataset is only
//! ever read after that, so reloading is safe but pointless.

pub mod csv;
pub mod observability;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::{DataSet, Schema};

pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats,
    StdErrObserver,
};

/// Options controlling load behavior.
///
/// Use [`Default`] for common cases (comma delimiter, no observer).
#[derive(Clone)]
pub struct LoadOptions {
    /// Field delimiter; `b','` for CSV, `b'\t'` for TSV.
    pub delimiter: u8,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("delimiter", &(self.delimiter as char))
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Unified load entry point for path-based sources.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column count stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >=
///   `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use tablequery::load::{load_from_path, LoadOptions};
/// use tablequery::types::{DataType, Field, Schema};
///
/// # fn main() -> tablequery::Result<()> {
/// let schema = Schema::new(vec![
///     Field::new("name", DataType::Utf8),
///     Field::new("sex", DataType::Sex),
///     Field::new("year", DataType::Int64),
///     Field::new("count", DataType::Int64),
/// ]);
/// let ds = load_from_path("names.csv", &schema, &LoadOptions::default())?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(
    path: impl AsRef<Path>,
    schema: &Schema,
    options: &LoadOptions,
) -> Result<DataSet> {
    let path = path.as_ref();
    let ctx = LoadContext {
        path: path.to_path_buf(),
    };

    let result = csv::read_csv_from_path(path, schema, options.delimiter);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ds) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: ds.row_count(),
                    columns: ds.schema.fields.len(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &Error) -> LoadSeverity {
    match e {
        Error::Io(_) => LoadSeverity::Critical,
        Error::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        _ => LoadSeverity::Error,
    }
}
