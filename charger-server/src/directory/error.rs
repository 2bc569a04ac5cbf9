//! Directory error types.

/// Errors from the station directory's persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}
