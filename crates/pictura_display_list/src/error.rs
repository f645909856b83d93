//! Recorder errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("a recording session is already open")]
    AlreadyRecording,

    #[error("no recording session is open")]
    NotRecording,

    #[error("invalid recorder config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RecorderError>;
