// Error type surfaced by the query layer
use thiserror::Error;

/// Generic failure returned by every query operation.
///
/// The underlying storage error is logged at the operation boundary and
/// deliberately not carried here; callers get one stable message per
/// operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to fetch {0}")]
pub struct DataFetchError(pub &'static str);

impl DataFetchError {
    /// The operation context this error names, e.g. `"revenue"`.
    pub fn context(&self) -> &'static str {
        self.0
    }
}
