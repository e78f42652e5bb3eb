//! Error taxonomy shared by every texproj component

use std::path::PathBuf;

pub type Result<T, E = TexError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum TexError {
    /// Paths are joined unquoted downstream, so spaces are rejected up front.
    #[error("Do not support file path with spaces: {}", .0.display())]
    PathContainsSpace(PathBuf),

    #[error("Circular inclusion of {} (chain: {})", .path.display(), format_chain(.chain))]
    CircularInclusion { path: PathBuf, chain: Vec<PathBuf> },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid project config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl TexError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TexError::Io {
            path: path.into(),
            source,
        }
    }
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
