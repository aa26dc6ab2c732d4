use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcdefError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A process file that could not be parsed into descriptors.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    ParseToml(#[from] toml::de::Error),

    #[error("failed to parse JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("failed to parse YAML: {0}")]
    ParseYaml(#[from] serde_yml::Error),

    #[error("app `{app}`: missing required field `{field}`")]
    MissingField { app: String, field: &'static str },

    #[error("invalid memory size `{value}`: {reason}")]
    InvalidMemorySize { value: String, reason: &'static str },

    #[error("invalid duration `{value}`: {reason}")]
    InvalidDuration { value: String, reason: &'static str },

    #[error("process file declares no apps")]
    NoApps,
}

/// A parsed value that violates a descriptor invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{field}`: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProcdefError>;
