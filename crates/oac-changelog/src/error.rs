//! Error types for changelog rendering.

use std::path::PathBuf;

/// Errors raised while loading formatter configuration.
///
/// Rendering itself is infallible; only template loading touches the
/// filesystem.
#[derive(Debug, thiserror::Error)]
pub enum ChangelogError {
    /// The template file could not be read.
    #[error("failed to read template {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template file is not valid TOML.
    #[error("invalid template: {0}")]
    Template(#[from] toml::de::Error),
}

/// Convenience alias for changelog results.
pub type ChangelogResult<T> = Result<T, ChangelogError>;
