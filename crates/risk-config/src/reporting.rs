//! Risk reporting configuration: heatmap axes and reporting scope.

use risk_core::enums::HeatmapBasis;
use risk_core::scale::Scale;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_scale_min() -> i64 {
    1
}

const fn default_scale_max() -> i64 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportingConfig {
    /// Lowest likelihood/impact score on the heatmap axes.
    #[serde(default = "default_scale_min")]
    pub scale_min: i64,

    /// Highest likelihood/impact score on the heatmap axes.
    #[serde(default = "default_scale_max")]
    pub scale_max: i64,

    /// Which assessment places risks on the heatmap.
    #[serde(default)]
    pub heatmap_basis: HeatmapBasis,

    /// Status id of closed risks. When set, those risks are left out of the
    /// heatmap and dashboard.
    #[serde(default)]
    pub closed_status_id: Option<i64>,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            scale_min: default_scale_min(),
            scale_max: default_scale_max(),
            heatmap_basis: HeatmapBasis::default(),
            closed_status_id: None,
        }
    }
}

impl ReportingConfig {
    /// Validated heatmap scale.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the bounds do not form a valid
    /// scale.
    pub fn scale(&self) -> Result<Scale, ConfigError> {
        Scale::new(self.scale_min, self.scale_max).map_err(|e| ConfigError::InvalidValue {
            field: "reporting.scale_min/scale_max".to_string(),
            reason: e.to_string(),
        })
    }

    /// Validated closed status id.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the id is not positive.
    pub fn closed_status_id(&self) -> Result<Option<i64>, ConfigError> {
        match self.closed_status_id {
            Some(id) if id <= 0 => Err(ConfigError::InvalidValue {
                field: "reporting.closed_status_id".to_string(),
                reason: format!("must be a positive integer, got {id}"),
            }),
            other => Ok(other),
        }
    }
}
