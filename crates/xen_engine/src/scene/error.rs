//! Scene error types

/// Errors raised by scene operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Scene files cannot be read or written yet
    #[error("scene persistence is not supported (path: {0})")]
    PersistenceUnsupported(String),
}
