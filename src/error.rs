//! Error types for the yacht-enhance crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Source-level network and parse failures are
//! recovered inside the enhancer and never surface through these types.

/// Errors that can occur during yacht data enhancement.
#[derive(Debug, thiserror::Error)]
pub enum EnhanceError {
    /// The caller supplied an empty or whitespace-only yacht name.
    #[error("invalid yacht name: {0}")]
    InvalidName(String),

    /// An HTTP request to a data source failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a data source response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid enhancer configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for yacht-enhance results.
pub type Result<T> = std::result::Result<T, EnhanceError>;
