//! Generation domain module - turns one generic template into per-type sources
//!
//! Each (type, template) pair goes through the same pipeline: the block
//! processor drops the sections the type has no capability for, then the
//! renderer substitutes the placeholder tokens.

pub mod blocks;
pub mod errors;
pub mod orchestrator;
pub mod renderer;
pub mod traits;
pub mod types;

pub use errors::*;
pub use orchestrator::*;
pub use renderer::*;
pub use traits::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Placeholder, TypeConfig, TypeRegistry};

    fn delimiter() -> String {
        format!("    {}\n", "/".repeat(75))
    }

    /// Run one template through both axes and the renderer
    fn generate(text: &str, config: &TypeConfig) -> String {
        let markers = Markers::default();
        let mut specialized = text.to_string();
        for capability in Capability::all() {
            specialized = blocks::strip(
                &specialized,
                markers.label(capability),
                capability.enabled_for(config),
            )
            .unwrap();
        }
        Renderer::new(&Placeholder::default(), SubstitutionMode::Literal)
            .unwrap()
            .render("FloatBuffer.kt", &specialized, config)
            .unwrap()
    }

    #[test]
    fn test_sum_section_follows_numeric_flag() {
        let d = delimiter();
        let template = format!(
            "\n{d}    // Iterable C + Numeric T\n{d}\n    fun sum(): Float {{\n        var s = 0f\n        return s\n    }}\n\n{d}    // Test\n{d}"
        );
        let registry = TypeRegistry::primitives();

        let char_output = generate(&template, registry.get("Char").unwrap());
        assert_eq!(char_output, format!("\n{d}    // Test\n{d}"));

        let int_output = generate(&template, registry.get("Int").unwrap());
        assert_eq!(
            int_output,
            format!(
                "\n{d}    // Iterable C + Numeric T\n{d}\n    fun sum(): Int {{\n        var s = 0\n        return s\n    }}\n\n{d}    // Test\n{d}"
            )
        );
    }

    #[test]
    fn test_every_primitive_renders_without_placeholders() {
        let d = delimiter();
        let template = format!(
            "class FloatBuffer(var data: FloatArray) {{\n{d}    // Iterable C + Comparable T\n{d}    fun min(): Float = data.min()\n{d}    // Iterable C + Numeric T\n{d}    fun sum(): Float = data.fold(0f) {{ a, b -> a + b }}\n}}\n"
        );

        for config in &TypeRegistry::primitives() {
            let output = generate(&template, config);
            assert!(!output.contains("Float"), "{config}: {output}");
            assert!(!output.contains("0f"), "{config}: {output}");
            assert!(output.starts_with(&format!("class {}Buffer", config.canonical_name)));
            assert_eq!(output.contains("fun min()"), config.is_ordered, "{config}");
            assert_eq!(output.contains("fun sum()"), config.is_numeric, "{config}");
        }
    }
}
