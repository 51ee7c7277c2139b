use gptree::config::{BuildMethod, ConfigManager, ConfigSection, EvaluationConfig, GeneratorConfig};
use gptree::NodeType;
use std::path::PathBuf;

fn temp_config_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gptree-{}-{}.toml", name, std::process::id()))
}

#[test]
fn test_save_then_load_with_env_override() -> anyhow::Result<()> {
    let path = temp_config_path("roundtrip");

    let manager = ConfigManager::new();
    manager.update(|c| {
        c.generator.root_type = NodeType::Numeric;
        c.generator.method = BuildMethod::Full;
        c.generator.max_depth = 4;
        c.generator.series_columns = vec!["close".to_string(), "open".to_string()];
    })?;
    manager.save_to_file(&path)?;

    std::env::set_var("GPTREE__EVALUATION__PARALLEL_THRESHOLD", "16");
    let loaded = ConfigManager::new();
    let result = loaded.load_from_file(&path);
    std::env::remove_var("GPTREE__EVALUATION__PARALLEL_THRESHOLD");
    let _ = std::fs::remove_file(&path);
    result?;

    let config = loaded.get();
    assert_eq!(config.generator.root_type, NodeType::Numeric);
    assert_eq!(config.generator.method, BuildMethod::Full);
    assert_eq!(config.generator.max_depth, 4);
    assert_eq!(config.generator.series_columns, vec!["close", "open"]);
    assert_eq!(config.evaluation.parallel_threshold, 16);
    Ok(())
}

#[test]
fn test_invalid_file_is_rejected() {
    let manager = ConfigManager::new();
    let result = manager.load_from_str("[generator]\nmin_depth = 9\nmax_depth = 3\n");
    assert!(result.is_err());
    assert_eq!(manager.get().generator.max_depth, GeneratorConfig::default().max_depth);
}

#[test]
fn test_missing_file_is_a_configuration_error() {
    let manager = ConfigManager::new();
    let err = manager
        .load_from_file(temp_config_path("does-not-exist"))
        .unwrap_err();
    assert_eq!(err.kind(), gptree::ErrorKind::Configuration);
}

#[test]
fn test_section_names() {
    assert_eq!(GeneratorConfig::section_name(), "generator");
    assert_eq!(EvaluationConfig::section_name(), "evaluation");
    assert_eq!(EvaluationConfig::default().to_manifest().fields.len(), 1);
}
