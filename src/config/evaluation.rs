use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::GpError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Bar ranges at least this long are evaluated in parallel
    pub parallel_threshold: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 4096,
        }
    }
}

impl ConfigSection for EvaluationConfig {
    fn section_name() -> &'static str {
        "evaluation"
    }

    fn validate(&self) -> Result<(), GpError> {
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Evaluation".to_string(),
            fields: vec![FieldManifest::new(
                "parallel_threshold",
                "integer",
                serde_json::json!(self.parallel_threshold),
                Some((0.0, 1_000_000.0)),
                "Minimum number of bars evaluated in parallel",
            )],
        }
    }
}
