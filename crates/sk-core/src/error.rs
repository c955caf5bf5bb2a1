use std::path::PathBuf;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading catalog or roster data.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A data file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A data file did not contain valid JSON for the expected shape.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// A data file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The file that failed to save.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Exported encounter data was not a valid list of encounters.
    #[error("invalid encounter data: {0}")]
    EncounterData(#[from] serde_json::Error),

    /// No catalog entry matched the requested name.
    #[error("no {kind} named \"{name}\" in catalog")]
    NotInCatalog {
        /// What was being looked up ("creature" or "hazard").
        kind: &'static str,
        /// The requested name.
        name: String,
    },
}
