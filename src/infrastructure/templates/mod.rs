//! Template loading implementations

pub mod filesystem_loader;

pub use filesystem_loader::*;
