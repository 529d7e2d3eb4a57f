use thiserror::Error;

/// Errors that can abort a sync cycle.
///
/// Missing or malformed *optional* fields on individual records never show
/// up here; the mapper and aggregator default those and keep going. Only
/// structural failures abort a cycle.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The remote API could not be reached (transport/network failure).
    /// Transient; callers may retry a whole cycle later.
    #[error("remote API unreachable: {0}")]
    RemoteUnavailable(String),

    /// The remote API answered with a non-success status. Likely a
    /// credential or permission issue; not retried automatically.
    #[error("remote API rejected the request: HTTP {status}: {body}")]
    RemoteRejected {
        /// HTTP status code returned by the remote.
        status: u16,
        /// Response body as returned by the remote.
        body: String,
    },

    /// The response could not be decoded into the expected shape.
    #[error("unexpected remote response shape: {0}")]
    RemoteMalformed(String),

    /// The configured project name does not exist remotely.
    #[error("project '{0}' not found")]
    ProjectNotFound(String),

    /// The API credential is absent; the cycle was never attempted.
    #[error("API token is not configured")]
    ConfigurationMissing,
}
