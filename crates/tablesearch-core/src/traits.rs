use std::path::PathBuf;

use crate::error::Result;
use crate::types::Row;

/// Somewhere knowledge tables can be read from by source identifier.
pub trait TableSource: Send + Sync {
    /// Reads every row of `source_id`, in source order.
    ///
    /// A source that does not exist is [`Error::SourceUnavailable`](crate::error::Error::SourceUnavailable).
    fn load(&self, source_id: &str) -> Result<Vec<Row>>;

    /// Where `source_id` would be read from, for diagnostics.
    fn locate(&self, source_id: &str) -> PathBuf;
}
