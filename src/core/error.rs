use thiserror::Error;

/// Recoverable failures reported by the world
#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("invalid world settings: {0}")]
    InvalidSettings(String),
    #[error("movement dependencies form a cycle through {count} items")]
    DependencyCycle { count: usize },
    #[error("world settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, UniverseError>;
