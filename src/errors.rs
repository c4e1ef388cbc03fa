use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The request to the remote store failed in transit or the parsing of
    /// the response failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The remote store answered with a non-success status code.
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The remote store connection parameters are absent or placeholders.
    #[error("Store not configured: {0}")]
    NotConfigured(&'static str),
    /// The remote store broke its own contract (e.g. an insert that
    /// returned no representation).
    #[error("Invariant from remote store: {0}")]
    Invariant(String),
    /// The local store file could not be written or the collection could
    /// not be serialized.
    #[error("Storage error: {0}")]
    Storage(String),
    /// No record with the given id exists.
    #[error("No record with id {0}")]
    NotFound(String),
    /// A caller-supplied required field is missing or empty.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StoreError {
    /// Whether the backing store cannot serve requests at all, as opposed to
    /// the caller addressing a record that does not exist or supplying bad
    /// input. Unavailability is what triggers the fallback path.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::StatusCode(..)
                | Self::NotConfigured(_)
                | Self::Invariant(_)
                | Self::Storage(_)
        )
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
