use image::RgbaImage;
use shapes::{BoundaryStrategy, DetectorConfig, ShapeError};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    ImageError(#[from] image::ImageError),
    #[error(transparent)]
    Detection(#[from] ShapeError),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// Loading and saving of [`DetectorConfig`] files
pub trait ConfigFile: Sized {
    fn from_toml(content: &str) -> Result<Self, CliError>;
    fn from_json(content: &str) -> Result<Self, CliError>;
    fn to_toml(&self) -> Result<String, CliError>;

    /// Auto-detect file format and load configuration
    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&fs::read_to_string(path_ref)?),
            Some("json") => Self::from_json(&fs::read_to_string(path_ref)?),
            _ => Err(CliError::UnsupportedFileFormat),
        }
    }
}

impl ConfigFile for DetectorConfig {
    fn from_toml(content: &str) -> Result<Self, CliError> {
        let config: DetectorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn from_json(content: &str) -> Result<Self, CliError> {
        let config: DetectorConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn to_toml(&self) -> Result<String, CliError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub threshold: Option<u8>,
    pub tolerance: Option<f64>,
    pub strategy: Option<BoundaryStrategy>,
}

impl Overrides {
    pub fn apply(&self, mut config: DetectorConfig) -> Result<DetectorConfig, CliError> {
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if let Some(strategy) = self.strategy {
            config.boundary_strategy = strategy;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Decode an image file into the RGBA layout the detector expects
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<RgbaImage, CliError> {
    Ok(image::open(path)?.to_rgba8())
}
