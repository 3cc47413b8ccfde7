//! Core types for the generation domain

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::registry::TypeConfig;

/// A capability axis that gates sections of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Numeric,
    Ordered,
}

impl Capability {
    /// Axes in the order they are applied
    pub fn all() -> [Capability; 2] {
        [Capability::Numeric, Capability::Ordered]
    }

    /// Whether `config` keeps sections gated by this axis
    pub fn enabled_for(&self, config: &TypeConfig) -> bool {
        match self {
            Capability::Numeric => config.is_numeric,
            Capability::Ordered => config.is_ordered,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Numeric => write!(f, "numeric"),
            Capability::Ordered => write!(f, "ordered"),
        }
    }
}

/// Marker labels for each capability axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Markers {
    pub numeric: String,
    pub ordered: String,
}

impl Markers {
    pub fn label(&self, capability: Capability) -> &str {
        match capability {
            Capability::Numeric => &self.numeric,
            Capability::Ordered => &self.ordered,
        }
    }

    /// The axis a section term belongs to, if any
    pub fn capability_of(&self, term: &str) -> Option<Capability> {
        Capability::all()
            .into_iter()
            .find(|capability| self.label(*capability) == term)
    }

    /// The axis whose label `term` contains without being equal to it.
    ///
    /// Such a term gates nothing, which is usually a typo in the header.
    pub fn near_miss(&self, term: &str) -> Option<Capability> {
        Capability::all().into_iter().find(|capability| {
            let label = self.label(*capability);
            term != label && term.contains(label)
        })
    }

    pub fn validate(&self) -> Result<(), crate::registry::ConfigError> {
        use crate::registry::ConfigError;

        for capability in Capability::all() {
            let label = self.label(capability);
            if label.trim().is_empty() {
                return Err(ConfigError::InvalidMarkers(format!(
                    "{capability} marker cannot be empty"
                )));
            }
            if label.trim() != label || label.contains('+') {
                return Err(ConfigError::InvalidMarkers(format!(
                    "{capability} marker '{label}' must be a single trimmed term without '+'"
                )));
            }
        }
        if self.numeric == self.ordered {
            return Err(ConfigError::InvalidMarkers(format!(
                "numeric and ordered share the marker '{}'",
                self.numeric
            )));
        }
        Ok(())
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            numeric: "Numeric T".to_string(),
            ordered: "Comparable T".to_string(),
        }
    }
}

/// How placeholder tokens are located in template text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionMode {
    /// Replace every occurrence, including inside longer identifiers
    #[default]
    Literal,
    /// Replace only occurrences bounded by non-word characters
    WordBoundary,
}

/// A template file as named in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateSpec {
    /// File name relative to the template directory
    pub source: String,
    /// Appended to the canonical type name to form the output file name
    #[serde(default)]
    pub suffix: Option<String>,
}

impl TemplateSpec {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            suffix: None,
        }
    }

    /// The explicit suffix, or the source name with `placeholder` stripped
    /// from its front
    pub fn resolve_suffix(&self, placeholder: &str) -> Option<String> {
        match &self.suffix {
            Some(suffix) => Some(suffix.clone()),
            None => self
                .source
                .rsplit('/')
                .next()
                .and_then(|file_name| file_name.strip_prefix(placeholder))
                .filter(|rest| !rest.is_empty())
                .map(str::to_string),
        }
    }
}

/// A loaded template, ready for specialization
#[derive(Debug, Clone)]
pub struct TemplateSource {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
    pub suffix: String,
}

impl TemplateSource {
    /// Where the specialization for `config` is written
    pub fn output_path(&self, config: &TypeConfig) -> PathBuf {
        let file_name = format!("{}{}", config.canonical_name, self.suffix);
        match self.path.parent() {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

/// Generated artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
    pub template: String,
    pub type_name: String,
}

/// Options for a generation run
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Render everything but write nothing
    pub dry_run: bool,
}

/// Result of generation
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub artifacts: Vec<Artifact>,
    pub written: bool,
}

impl GenerationReport {
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.artifacts.iter().map(|artifact| &artifact.path)
    }
}
