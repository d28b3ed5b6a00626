use thiserror::Error;

#[derive(Error, Debug)]
pub enum TempoError {
    #[error("main project '{0}' not found")]
    MainProjectNotFound(String),

    #[error("sub-project '{1}' not found in '{0}'")]
    SubProjectNotFound(String, String),

    #[error("main project '{0}' already exists")]
    DuplicateMainProject(String),

    #[error("sub-project '{1}' already exists in '{0}'")]
    DuplicateSubProject(String, String),

    #[error("cannot demote '{0}' into itself")]
    DemoteIntoSelf(String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TempoError>;
