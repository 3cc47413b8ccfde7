//! Tera-based token substitution renderer
//!
//! Rendering happens in two phases. First, the placeholder tokens are
//! rewritten into tera parameters (`Float` becomes `{{ canonical_name }}`),
//! one token per pass in priority order. A pass only searches the literal
//! text the earlier passes left behind, so where two tokens overlap the
//! higher priority one wins. Then tera resolves all parameters at once
//! against the [`TypeConfig`]. A value inserted for one token is never
//! scanned again, so a type whose zero literal is `0` cannot be hit by a
//! later substitution.

use regex::Regex;
use std::ops::Range;
use tera::{Context, Tera};

use crate::generation::{RenderError, SubstitutionMode};
use crate::registry::{Placeholder, TypeConfig};

const RAW_OPEN: &str = "{% raw %}";
const RAW_CLOSE: &str = "{% endraw %}";

/// Phase one output: untouched source ranges and emitted parameters
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(Range<usize>),
    Parameter(&'static str),
}

/// Renders specialized template text for one type at a time
#[derive(Debug, Clone)]
pub struct Renderer {
    /// One pattern per placeholder token, highest priority first
    passes: Vec<(Regex, &'static str)>,
}

impl Renderer {
    pub fn new(placeholder: &Placeholder, mode: SubstitutionMode) -> Result<Self, RenderError> {
        let passes = placeholder
            .tokens()
            .into_iter()
            .map(|(token, parameter)| {
                let escaped = regex::escape(token);
                let pattern = match mode {
                    SubstitutionMode::Literal => escaped,
                    SubstitutionMode::WordBoundary => format!(r"\b{escaped}\b"),
                };
                Ok((Regex::new(&pattern)?, parameter))
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        Ok(Self { passes })
    }

    /// Split `text` into literal ranges and placeholder parameters
    fn tokenize(&self, text: &str) -> Vec<Piece> {
        let mut pieces = vec![Piece::Literal(0..text.len())];

        for (pattern, parameter) in &self.passes {
            let mut next = Vec::with_capacity(pieces.len());
            for piece in pieces {
                let Piece::Literal(range) = piece else {
                    next.push(piece);
                    continue;
                };
                // Searching a truncated haystack from `start` keeps the text
                // before the range visible to `\b`
                let haystack = &text[..range.end];
                let mut last = range.start;
                while let Some(found) = pattern.find_at(haystack, last) {
                    if found.is_empty() {
                        break;
                    }
                    next.push(Piece::Literal(last..found.start()));
                    next.push(Piece::Parameter(parameter));
                    last = found.end();
                }
                next.push(Piece::Literal(last..range.end));
            }
            pieces = next;
        }

        pieces.retain(|piece| !matches!(piece, Piece::Literal(range) if range.is_empty()));
        pieces
    }

    /// Rewrite placeholder tokens into tera parameter syntax
    pub fn parameterize(&self, text: &str) -> Result<String, RenderError> {
        let mut source = String::with_capacity(text.len());

        for piece in self.tokenize(text) {
            match piece {
                Piece::Literal(range) => {
                    push_literal(&mut source, &text[range.clone()], range.start)?;
                }
                Piece::Parameter(parameter) => {
                    source.push_str("{{ ");
                    source.push_str(parameter);
                    source.push_str(" }}");
                }
            }
        }

        Ok(source)
    }

    /// Produce the final source text for `config`
    pub fn render(
        &self,
        name: &str,
        text: &str,
        config: &TypeConfig,
    ) -> Result<String, RenderError> {
        let source = self.parameterize(text)?;

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(name, &source)?;

        let context = Context::from_serialize(config)?;
        let rendered = tera.render(name, &context)?;

        tracing::trace!(
            template = %name,
            type_name = %config.canonical_name,
            bytes = rendered.len(),
            "Rendered template"
        );
        Ok(rendered)
    }
}

/// Append literal text, shielding anything tera would read as syntax
fn push_literal(source: &mut String, literal: &str, offset: usize) -> Result<(), RenderError> {
    let needs_raw = ["{{", "{%", "{#"].iter().any(|open| literal.contains(open))
        || literal.ends_with('{');
    if !needs_raw {
        source.push_str(literal);
        return Ok(());
    }

    if let Some(position) = find_endraw(literal) {
        return Err(RenderError::UnescapableLiteral {
            offset: offset + position,
        });
    }
    source.push_str(RAW_OPEN);
    source.push_str(literal);
    source.push_str(RAW_CLOSE);
    Ok(())
}

/// Byte offset of a `{% endraw` tag, tolerating `-` and whitespace
fn find_endraw(literal: &str) -> Option<usize> {
    literal.match_indices("{%").map(|(index, _)| index).find(|&index| {
        literal[index + 2..]
            .trim_start_matches('-')
            .trim_start()
            .starts_with("endraw")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> TypeConfig {
        TypeConfig::new("Int", "int", "0", "0", true, true)
    }

    fn literal_renderer() -> Renderer {
        Renderer::new(&Placeholder::default(), SubstitutionMode::Literal).unwrap()
    }

    #[test]
    fn test_parameterize() {
        let source = literal_renderer()
            .parameterize("val xs = FloatArray(4) // float buffer, zero 0f")
            .unwrap();
        assert_eq!(
            source,
            "val xs = {{ canonical_name }}Array(4) // {{ lowercase_name }} buffer, zero {{ zero_literal }}"
        );
    }

    #[test]
    fn test_render_int() {
        let template = "class FloatBuffer {\n    var buffer = FloatArray(16)\n    fun get(i: Int): Float = buffer[i]\n    fun clear() { buffer.fill(0f) }\n    fun toFloatArray(): FloatArray = buffer.copyOf() // float\n}\n";
        let rendered = literal_renderer().render("FloatBuffer.kt", template, &int()).unwrap();

        assert_eq!(
            rendered,
            "class IntBuffer {\n    var buffer = IntArray(16)\n    fun get(i: Int): Int = buffer[i]\n    fun clear() { buffer.fill(0) }\n    fun toIntArray(): IntArray = buffer.copyOf() // int\n}\n"
        );
    }

    #[test]
    fn test_no_placeholder_survives() {
        let template = "Float float 0f FloatFloat floatfloat 0f0f \"Float\" /* 0f */\n";
        let long = TypeConfig::new("Long", "long", "0L", "0L", true, true);
        let rendered = literal_renderer().render("t", template, &long).unwrap();

        assert!(!rendered.contains("Float"));
        assert!(!rendered.contains("float"));
        assert!(!rendered.contains("0f"));
        assert_eq!(rendered, "Long long 0L LongLong longlong 0L0L \"Long\" /* 0L */\n");
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        // The lowercase value contains the canonical placeholder
        let tricky = TypeConfig::new("Float", "Float", "float", "float", true, true);
        let rendered = literal_renderer().render("t", "Float|float|0f", &tricky).unwrap();
        assert_eq!(rendered, "Float|Float|float");

        let swapped = TypeConfig::new("float", "0f", "Float", "Float", true, true);
        let rendered = literal_renderer().render("t", "Float|float|0f", &swapped).unwrap();
        assert_eq!(rendered, "float|0f|Float");
    }

    #[test]
    fn test_overlapping_tokens_follow_priority() {
        // `0f` starts first, but `float` outranks the zero literal
        let rendered = literal_renderer().render("t", "x0floaty", &int()).unwrap();
        assert_eq!(rendered, "x0inty");

        let rendered = literal_renderer().render("t", "0Float0float0f", &int()).unwrap();
        assert_eq!(rendered, "0Int0int0");
    }

    #[test]
    fn test_canonical_outranks_longer_lowercase() {
        let placeholder = Placeholder {
            canonical_name: "T".to_string(),
            lowercase_name: "Tz".to_string(),
            zero_literal: "zero".to_string(),
            sum_zero_literal: None,
        };
        let renderer = Renderer::new(&placeholder, SubstitutionMode::Literal).unwrap();
        let rendered = renderer.render("t", "T Tz zero", &int()).unwrap();
        assert_eq!(rendered, "Int Intz 0");
    }

    #[test]
    fn test_tokenize_maps_each_match_to_its_parameter() {
        let pieces = literal_renderer().tokenize("a0floatb Float");
        assert_eq!(
            pieces,
            vec![
                Piece::Literal(0..2),
                Piece::Parameter("lowercase_name"),
                Piece::Literal(7..9),
                Piece::Parameter("canonical_name"),
            ]
        );
    }

    #[test]
    fn test_word_boundary_sees_text_around_earlier_matches() {
        let renderer = Renderer::new(&Placeholder::default(), SubstitutionMode::WordBoundary).unwrap();
        let rendered = renderer.render("t", "Float-float float0f 0f", &int()).unwrap();
        assert_eq!(rendered, "Int-int float0f 0");
    }

    #[test]
    fn test_word_boundary_mode() {
        let renderer = Renderer::new(&Placeholder::default(), SubstitutionMode::WordBoundary).unwrap();
        let rendered = renderer
            .render("t", "Float FloatArray floaty float 0f", &int())
            .unwrap();
        assert_eq!(rendered, "Int FloatArray floaty int 0");
    }

    #[test]
    fn test_template_syntax_in_source_is_literal() {
        let template = "val m = mapOf<Float, Int>()\nval s = \"{{ not a param }} {% if %} {# x #}\"\nfun f() {{ 0f }}\n";
        let rendered = literal_renderer().render("t", template, &int()).unwrap();
        assert_eq!(
            rendered,
            "val m = mapOf<Int, Int>()\nval s = \"{{ not a param }} {% if %} {# x #}\"\nfun f() {{ 0 }}\n"
        );
    }

    #[test]
    fn test_brace_before_placeholder() {
        let rendered = literal_renderer().render("t", "x{Float}", &int()).unwrap();
        assert_eq!(rendered, "x{Int}");
    }

    #[test]
    fn test_no_html_escaping() {
        let char_config = TypeConfig::new("Char", "char", "0.toChar()", "0.toChar()", false, true);
        let rendered = literal_renderer()
            .render("FloatBuffer.html", "List<Float> = 0f && a < b", &char_config)
            .unwrap();
        assert_eq!(rendered, "List<Char> = 0.toChar() && a < b");
    }

    #[test]
    fn test_source_parameters_are_not_resolved() {
        let rendered = literal_renderer()
            .render("t", "var s = {{ sum_zero_literal }}", &int())
            .unwrap();
        assert_eq!(rendered, "var s = {{ sum_zero_literal }}");
    }

    #[test]
    fn test_sum_zero_token() {
        let placeholder = Placeholder {
            sum_zero_literal: Some("0.0f".to_string()),
            ..Placeholder::default()
        };
        let renderer = Renderer::new(&placeholder, SubstitutionMode::Literal).unwrap();
        let char_config = TypeConfig::new("Char", "char", "0.toChar()", "0", false, true);

        let rendered = renderer
            .render("t", "var s = 0.0f; var z = 0f", &char_config)
            .unwrap();
        assert_eq!(rendered, "var s = 0; var z = 0.toChar()");
    }

    #[test]
    fn test_endraw_in_source_is_rejected() {
        let result = literal_renderer().render("t", "a {% endraw %} Float", &int());
        match result.unwrap_err() {
            RenderError::UnescapableLiteral { offset } => assert_eq!(offset, 2),
            other => panic!("Expected UnescapableLiteral, got {other:?}"),
        }

        let result = literal_renderer().render("t", "Float x {%-  endraw %}", &int());
        match result.unwrap_err() {
            RenderError::UnescapableLiteral { offset } => assert_eq!(offset, 8),
            other => panic!("Expected UnescapableLiteral, got {other:?}"),
        }
    }

    #[test]
    fn test_find_endraw() {
        assert_eq!(find_endraw("{% raw %} x"), None);
        assert_eq!(find_endraw("ab{%endraw%}"), Some(2));
        assert_eq!(find_endraw("{% if %}{%- endraw -%}"), Some(8));
    }
}
