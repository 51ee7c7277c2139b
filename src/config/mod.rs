pub mod traits;
pub mod generator;
pub mod evaluation;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use generator::{BuildMethod, GeneratorConfig};
pub use evaluation::EvaluationConfig;
pub use traits::{ConfigManifest, ConfigSection, FieldManifest};
