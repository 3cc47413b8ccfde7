//! primspec: specialize one generic container template per primitive type.
//!
//! The pipeline has three parts:
//!
//! - [`registry`]: the validated list of target types and their literals
//! - [`generation::blocks`]: drops sections a type has no capability for
//! - [`generation::Renderer`]: substitutes placeholder tokens via tera
//!
//! [`generation::GenerationOrchestrator`] ties them together behind the
//! template loading and output ports implemented in [`infrastructure`].
#![deny(unsafe_code)]

pub mod generation;
pub mod infrastructure;
pub mod registry;

pub use generation::{
    GenerateOptions, GenerationError, GenerationOrchestrator, GenerationReport, Renderer,
};
pub use infrastructure::GeneratorConfig;
pub use registry::{TypeConfig, TypeRegistry};
