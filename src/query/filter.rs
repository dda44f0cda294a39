//! The filter chokepoint.

use super::criteria::RowPredicate;
use crate::types::DataSet;

/// Returns the order-preserving view of `dataset` selected by `predicate`.
///
/// Every call site renders "the filtered data" from the output of this one
/// function, with a fully-specified [`super::FilterCriteria`]; charts are
/// never fed views built from partial filter combinations.
pub fn filter(dataset: &DataSet, predicate: &RowPredicate) -> DataSet {
    dataset.filter_rows(|row| predicate.matches(row))
}
