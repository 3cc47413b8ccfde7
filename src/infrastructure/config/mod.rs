//! Generator configuration
//!
//! A run is described by a YAML file:
//!
//! ```yaml
//! template_dir: src/main/kotlin/data
//! placeholder:
//!   canonical_name: Float
//!   lowercase_name: float
//!   zero_literal: 0f
//! templates:
//!   - source: FloatBuffer.kt
//!   - source: FloatDeque.kt
//! types:
//!   - canonical_name: Int
//!     lowercase_name: int
//!     zero_literal: "0"
//!     sum_zero_literal: "0"
//!     is_numeric: true
//!     is_ordered: true
//! ```
//!
//! Every field except `templates` has a default. Parsing validates the whole
//! configuration, so errors surface before any template is read.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::generation::{Markers, SubstitutionMode, TemplateSpec};
use crate::registry::{ConfigError, Placeholder, TypeConfig, TypeRegistry};

/// Name of the config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "primspec.yml";

/// Default template directory, relative to the config location
pub const DEFAULT_TEMPLATE_DIR: &str = "templates/kotlin";

/// Internal representation matching the YAML structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigData {
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,
    #[serde(default)]
    pub placeholder: Placeholder,
    #[serde(default)]
    pub markers: Markers,
    #[serde(default)]
    pub substitution: SubstitutionMode,
    pub templates: Vec<TemplateSpec>,
    /// `None` selects the built-in primitives
    #[serde(default)]
    pub types: Option<Vec<TypeConfig>>,
}

fn default_template_dir() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATE_DIR)
}

/// A validated generator configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub template_dir: PathBuf,
    pub placeholder: Placeholder,
    pub markers: Markers,
    pub substitution: SubstitutionMode,
    pub templates: Vec<TemplateSpec>,
    pub registry: TypeRegistry,
}

impl GeneratorConfig {
    /// Override the template directory, e.g. from the command line
    pub fn with_template_dir(mut self, template_dir: impl Into<PathBuf>) -> Self {
        self.template_dir = template_dir.into();
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            placeholder: Placeholder::default(),
            markers: Markers::default(),
            substitution: SubstitutionMode::default(),
            templates: vec![
                TemplateSpec::new("FloatBuffer.kt"),
                TemplateSpec::new("FloatDeque.kt"),
            ],
            registry: TypeRegistry::primitives(),
        }
    }
}

impl ConfigData {
    /// Validate and convert into the domain model
    fn into_domain_model(self) -> Result<GeneratorConfig, ConfigError> {
        self.placeholder.validate()?;
        self.markers.validate()?;

        if self.templates.is_empty() {
            return Err(ConfigError::InvalidTemplates(
                "at least one template is required".to_string(),
            ));
        }
        for spec in &self.templates {
            if spec.source.trim().is_empty() {
                return Err(ConfigError::InvalidTemplates(
                    "template source cannot be empty".to_string(),
                ));
            }
        }

        let registry = match self.types {
            Some(types) => TypeRegistry::new(types)?,
            None => TypeRegistry::primitives(),
        };

        Ok(GeneratorConfig {
            template_dir: self.template_dir,
            placeholder: self.placeholder,
            markers: self.markers,
            substitution: self.substitution,
            templates: self.templates,
            registry,
        })
    }
}

/// Parse config YAML content into the domain model
pub fn parse_config_yaml(content: &str) -> Result<GeneratorConfig, ConfigError> {
    let data: ConfigData = serde_yaml::from_str(content)?;
    data.into_domain_model()
}

/// Load a config file; a relative `template_dir` resolves against its folder
pub async fn load_config(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let mut config = parse_config_yaml(&content)?;
    if config.template_dir.is_relative() {
        if let Some(parent) = path.parent() {
            config.template_dir = parent.join(&config.template_dir);
        }
    }
    Ok(config)
}
