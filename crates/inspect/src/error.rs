use std::fmt;

/// Failure reported by a host collaborator (fetch, I/O). Kept opaque to the core.
pub type HostError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why the server-rendered head could not be used.
#[derive(Debug)]
pub enum SnapshotError {
    /// Fetching the document's own location failed (network error or non-success response).
    Fetch(HostError),
    /// The fetched markup has no head to isolate.
    MissingHead,
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Fetch(err) => write!(f, "fetching the static document failed: {err}"),
            SnapshotError::MissingHead => f.write_str("the static document has no <head>"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Fetch(err) => Some(err.as_ref()),
            SnapshotError::MissingHead => None,
        }
    }
}
