use super::{
    evaluation::EvaluationConfig,
    generator::GeneratorConfig,
    traits::ConfigSection,
};
use crate::error::GpError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Prefix for environment overrides, e.g. `GPTREE__GENERATOR__MAX_DEPTH=8`
pub const ENV_PREFIX: &str = "GPTREE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generator: GeneratorConfig,
    pub evaluation: EvaluationConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GpError> {
        self.generator.validate()?;
        self.evaluation.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load a TOML file, layering `GPTREE__SECTION__FIELD` environment overrides on top.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GpError> {
        let config: AppConfig = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| GpError::Configuration(format!("Failed to load config: {}", e)))?;

        self.install(config)?;
        log::info!("Loaded configuration from {}", path.as_ref().display());
        Ok(())
    }

    pub fn load_from_str(&self, contents: &str) -> Result<(), GpError> {
        let config: AppConfig = toml::from_str(contents)
            .map_err(|e| GpError::Configuration(format!("Failed to parse config: {}", e)))?;
        self.install(config)
    }

    fn install(&self, config: AppConfig) -> Result<(), GpError> {
        config.validate()?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GpError> {
        let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
        let toml_str = toml::to_string_pretty(&*config)
            .map_err(|e| GpError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Apply `f` to a copy and keep it only if the result validates.
    pub fn update<F>(&self, f: F) -> Result<(), GpError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut updated = config.clone();
        f(&mut updated);
        updated.validate()?;
        *config = updated;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeType;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let manager = ConfigManager::new();
        manager
            .load_from_str("[generator]\nmax_depth = 3\nroot_type = \"Numeric\"\n")
            .unwrap();
        let config = manager.get();
        assert_eq!(config.generator.max_depth, 3);
        assert_eq!(config.generator.root_type, NodeType::Numeric);
        assert_eq!(config.evaluation.parallel_threshold, 4096);
    }

    #[test]
    fn test_invalid_update_is_rolled_back() {
        let manager = ConfigManager::new();
        let result = manager.update(|c| c.generator.terminal_probability = 2.0);
        assert!(result.is_err());
        assert_eq!(manager.get().generator.terminal_probability, 0.3);
    }
}
