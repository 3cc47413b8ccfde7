//! Error types for the generation domain

use std::path::PathBuf;
use thiserror::Error;

/// A template whose section structure cannot be scanned
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("Section header '{title}' at line {line} is not followed by a closing delimiter")]
    UnterminatedHeader { title: String, line: usize },
}

/// Errors from the token substitution renderer
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Literal text at byte {offset} contains '{{% endraw' and cannot be escaped")]
    UnescapableLiteral { offset: usize },

    #[error("Invalid placeholder pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),
}

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Malformed template '{template}' (type {type_name}, marker '{marker}'): {source}")]
    MalformedTemplate {
        template: String,
        type_name: String,
        marker: String,
        #[source]
        source: BlockError,
    },

    #[error("Failed to render template '{template}' for type {type_name}: {source}")]
    Render {
        template: String,
        type_name: String,
        #[source]
        source: RenderError,
    },

    #[error("Template load error: {0}")]
    TemplateLoad(String),

    #[error("Template '{template}' has no output suffix; set one explicitly")]
    MissingSuffix { template: String },

    #[error("Output for type {type_name} would overwrite template {}", .path.display())]
    OutputOverwritesTemplate { type_name: String, path: PathBuf },

    #[error("More than one artifact would be written to {}", .path.display())]
    DuplicateOutput { path: PathBuf },

    #[error("Output error: {0}")]
    Output(String),
}
