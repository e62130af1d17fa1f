use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Everything that can go wrong during a conversion.
///
/// All variants are fail-fast: no retries, no partial output. Validation runs
/// before the bundle writer, so any of these surfacing means no archive was
/// written.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The path is missing, unreadable, not parseable as delimited text, or
    /// (for the output archive) not writable.
    #[error("cannot access '{path}': {source}")]
    File {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A named column is absent from the source table.
    #[error("column '{name}' not found; available columns: {available:?}")]
    Schema {
        name: String,
        available: Vec<String>,
    },

    /// Structural mismatch: wrong column count or a malformed cell.
    #[error("{0}")]
    Validation(String),

    /// A row index outside [0, n).
    #[error("{context} index {index} out of bounds for table with {rows} rows")]
    Bounds {
        context: &'static str,
        index: i64,
        rows: usize,
    },
}

impl ConvertError {
    /// Wrap an I/O or parse failure with the path it happened on.
    pub fn file(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConvertError::File {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
