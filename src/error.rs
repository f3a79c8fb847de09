use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuChatError {
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Preference store error: {0}")]
    PreferenceError(String),
    #[error("Menu error: {0}")]
    MenuError(String),
    #[error("Tool error: {0}")]
    ToolError(String),
    #[error("Tool '{0}' not found")]
    UnknownTool(String),
    #[error("Invalid arguments for tool '{name}': {message}")]
    ToolArguments { name: String, message: String },
    #[error("Completion response contained no choices")]
    EmptyResponse,
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for MenuChatError {
    fn from(err: anyhow::Error) -> Self {
        MenuChatError::ConfigError(format!("{:#}", err))
    }
}

impl From<String> for MenuChatError {
    fn from(msg: String) -> Self {
        MenuChatError::Other(msg)
    }
}

impl From<&str> for MenuChatError {
    fn from(msg: &str) -> Self {
        MenuChatError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MenuChatError>;
