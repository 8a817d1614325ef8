use std::path::PathBuf;
use thiserror::Error;

/// Fatal failure while loading the startup datasets.
///
/// There is no partial-load mode: any of these aborts startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{dataset}: cannot read {}", path.display())]
    Io {
        dataset: &'static str,
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("{dataset}: malformed CSV")]
    Csv {
        dataset: &'static str,
        #[source]
        error: csv::Error,
    },

    #[error("{dataset}: required column '{column}' is missing")]
    MissingColumn {
        dataset: &'static str,
        column: &'static str,
    },

    #[error("{dataset}: row {row}, column '{column}': invalid value '{value}' ({reason})")]
    InvalidField {
        dataset: &'static str,
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },

    #[error("{dataset}: source contains no rows")]
    EmptySource { dataset: &'static str },

    #[error("datasets are already initialized")]
    AlreadyInitialized,
}
