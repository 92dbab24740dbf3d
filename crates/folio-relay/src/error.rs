use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("failed to bind relay on {addr}: {reason}")]
    Bind { addr: String, reason: String },
    #[error("failed to write mail spool {path}: {source}")]
    Spool {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("mail delivery rejected: {0}")]
    Rejected(String),
}
