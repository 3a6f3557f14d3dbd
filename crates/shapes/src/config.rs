use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use crate::{
    algorithms::BoundaryStrategy,
    error::{Result, ShapeError},
};

/// Tunable parameters of the default pipeline.
///
/// Every field has a default, so partial TOML or JSON documents deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DetectorConfig {
    /// Mean RGB value below which a pixel counts as dark
    pub threshold: u8,
    /// Components with this many pixels or fewer are dropped as noise
    pub min_component_pixels: usize,
    /// Douglas-Peucker tolerance, in pixels
    #[schemars(range(min = 0.0))]
    pub tolerance: f64,
    pub boundary_strategy: BoundaryStrategy,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: 128,
            min_component_pixels: 10,
            tolerance: 2.0,
            boundary_strategy: BoundaryStrategy::default(),
        }
    }
}

impl DetectorConfig {
    /// Get the JSON schema for the configuration
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(DetectorConfig)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ShapeError::InvalidConfig(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
