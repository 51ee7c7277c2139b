use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::GpError;
use crate::types::NodeType;
use serde::{Deserialize, Serialize};

/// Settings for the node factory and random tree building
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub root_type: NodeType,
    pub method: BuildMethod,
    pub min_depth: usize,
    pub max_depth: usize,
    /// Chance of stopping at a terminal before `max_depth` when growing
    pub terminal_probability: f64,
    pub constant_min: f64,
    pub constant_max: f64,
    pub series_columns: Vec<String>,
    pub max_lag: usize,
    pub ma_periods: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildMethod {
    Grow,
    Full,
    RampedHalfAndHalf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root_type: NodeType::Boolean,
            method: BuildMethod::RampedHalfAndHalf,
            min_depth: 2,
            max_depth: 6,
            terminal_probability: 0.3,
            constant_min: -100.0,
            constant_max: 100.0,
            series_columns: vec!["close".to_string()],
            max_lag: 5,
            ma_periods: vec![5, 10, 14, 20, 50, 100, 200],
        }
    }
}

impl ConfigSection for GeneratorConfig {
    fn section_name() -> &'static str {
        "generator"
    }

    fn validate(&self) -> Result<(), GpError> {
        if self.max_depth == 0 {
            return Err(GpError::Configuration(
                "Max depth must be at least 1".to_string()
            ));
        }
        if self.min_depth > self.max_depth {
            return Err(GpError::Configuration(
                "Min depth must not exceed max depth".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.terminal_probability) {
            return Err(GpError::Configuration(
                "Terminal probability must be between 0 and 1".to_string()
            ));
        }
        if !self.constant_min.is_finite()
            || !self.constant_max.is_finite()
            || self.constant_min > self.constant_max
        {
            return Err(GpError::Configuration(
                "Constant range must be finite with min <= max".to_string()
            ));
        }
        if !(self.constant_max - self.constant_min).is_finite() {
            return Err(GpError::Configuration(
                "Constant range span must be finite".to_string()
            ));
        }
        if self.ma_periods.iter().any(|p| *p == 0) {
            return Err(GpError::Configuration(
                "Moving average periods must be positive".to_string()
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Generator".to_string(),
            fields: vec![
                FieldManifest::new(
                    "min_depth",
                    "integer",
                    serde_json::json!(self.min_depth),
                    Some((0.0, 32.0)),
                    "Minimum depth of ramped trees",
                ),
                FieldManifest::new(
                    "max_depth",
                    "integer",
                    serde_json::json!(self.max_depth),
                    Some((1.0, 32.0)),
                    "Maximum depth of generated trees",
                ),
                FieldManifest::new(
                    "terminal_probability",
                    "float",
                    serde_json::json!(self.terminal_probability),
                    Some((0.0, 1.0)),
                    "Chance of picking a terminal while growing",
                ),
                FieldManifest::new(
                    "constant_min",
                    "float",
                    serde_json::json!(self.constant_min),
                    None,
                    "Lower bound for random constants",
                ),
                FieldManifest::new(
                    "constant_max",
                    "float",
                    serde_json::json!(self.constant_max),
                    None,
                    "Upper bound for random constants",
                ),
                FieldManifest::new(
                    "max_lag",
                    "integer",
                    serde_json::json!(self.max_lag),
                    Some((0.0, 1000.0)),
                    "Largest lag for series value terminals",
                ),
            ],
        }
    }
}
