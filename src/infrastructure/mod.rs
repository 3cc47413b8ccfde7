//! Infrastructure layer - filesystem and configuration adapters

pub mod config;
pub mod output;
pub mod templates;

pub use config::{GeneratorConfig, load_config, parse_config_yaml};
pub use output::FileSystemOutputService;
pub use templates::FileSystemTemplateLoader;
