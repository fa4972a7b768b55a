use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SigCore error: {0}")]
    SigCore(#[from] sigcore::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse settings: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Failed to write settings: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
