use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid damage status: {0}")]
    InvalidStatus(String),
    #[error("invalid weather: {0}")]
    InvalidWeather(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
