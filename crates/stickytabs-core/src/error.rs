use thiserror::Error;

/// Failure reported by a host list when a scroll-to-row request cannot be honored
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrollTargetError {
    #[error("row {row} is outside the measured range (0..{len})")]
    OutOfRange { row: usize, len: usize },

    #[error("list is not ready to scroll")]
    NotReady,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Section index {index} out of range ({count} sections)")]
    SectionOutOfRange { index: usize, count: usize },

    #[error("Scroll target error: {0}")]
    ScrollTarget(#[from] ScrollTargetError),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the caller may retry the operation once the host list settles
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::ScrollTarget(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
