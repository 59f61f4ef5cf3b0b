use thiserror::Error;

/// Crate-local result alias, matching the rest of the workspace's
/// one-error-enum-per-crate convention.
pub type Result<T> = std::result::Result<T, AcmiError>;

#[derive(Debug, Error)]
pub enum AcmiError {
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused { host: String, port: u16 },

    #[error("connection reset by peer")]
    ConnectionReset,

    #[error("end of stream")]
    EndOfFile,

    #[error("max iterations ({0}) reached")]
    MaxIterations(u64),

    #[error("session with start_time {0} already processed; re-run with --overwrite")]
    DuplicateSession(String),

    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    #[error("handshake failed: {0}")]
    Handshake(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
