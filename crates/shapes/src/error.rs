use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("Pixel buffer has {actual} bytes, expected {expected} (width * height * 4)")]
    InvalidBuffer { expected: usize, actual: usize },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShapeError>;
