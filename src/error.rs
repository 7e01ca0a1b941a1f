/// Errors surfaced by the audit library.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The URL is not a well-formed absolute URL with a scheme and host.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network error, timeout or non-success HTTP status.
    #[error(transparent)]
    Fetch(#[from] reqwest::Error),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

pub type Result<T> = std::result::Result<T, AuditError>;
