//! Per-type attribute records and the placeholder they replace

use serde::{Deserialize, Serialize};
use std::fmt;

/// One target primitive type.
///
/// Field names double as the render parameter names the renderer resolves
/// placeholder tokens against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeConfig {
    /// Display name, e.g. `Int`
    pub canonical_name: String,
    /// Lowercase spelling, e.g. `int`
    pub lowercase_name: String,
    /// Literal for the default value, e.g. `0L`
    pub zero_literal: String,
    /// Literal for the identity of a sum
    pub sum_zero_literal: String,
    /// Keep sections gated by the numeric marker
    pub is_numeric: bool,
    /// Keep sections gated by the ordered marker
    pub is_ordered: bool,
}

impl TypeConfig {
    pub fn new(
        canonical_name: impl Into<String>,
        lowercase_name: impl Into<String>,
        zero_literal: impl Into<String>,
        sum_zero_literal: impl Into<String>,
        is_numeric: bool,
        is_ordered: bool,
    ) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            lowercase_name: lowercase_name.into(),
            zero_literal: zero_literal.into(),
            sum_zero_literal: sum_zero_literal.into(),
            is_numeric,
            is_ordered,
        }
    }

    /// Names of the string fields that are empty
    pub(crate) fn empty_fields(&self) -> Vec<&'static str> {
        [
            ("canonical_name", &self.canonical_name),
            ("lowercase_name", &self.lowercase_name),
            ("zero_literal", &self.zero_literal),
            ("sum_zero_literal", &self.sum_zero_literal),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

impl fmt::Display for TypeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_name)
    }
}

/// The tokens a generic template is written against.
///
/// `sum_zero_literal` is optional: most templates accumulate from the plain
/// zero literal and never spell out a separate sum identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Placeholder {
    pub canonical_name: String,
    pub lowercase_name: String,
    pub zero_literal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sum_zero_literal: Option<String>,
}

impl Placeholder {
    /// Pairs of (token, render parameter name), highest priority first.
    ///
    /// Where two tokens overlap in template text the earlier one wins. The
    /// sum identity comes before the plain zero literal it usually extends
    /// (`0.0f` contains `0f`).
    pub fn tokens(&self) -> Vec<(&str, &'static str)> {
        let mut tokens = vec![
            (self.canonical_name.as_str(), "canonical_name"),
            (self.lowercase_name.as_str(), "lowercase_name"),
        ];
        if let Some(sum_zero) = &self.sum_zero_literal {
            tokens.push((sum_zero.as_str(), "sum_zero_literal"));
        }
        tokens.push((self.zero_literal.as_str(), "zero_literal"));
        tokens
    }

    pub fn validate(&self) -> Result<(), super::ConfigError> {
        let tokens = self.tokens();
        for &(token, field) in &tokens {
            if token.is_empty() {
                return Err(super::ConfigError::InvalidPlaceholder(format!(
                    "{field} cannot be empty"
                )));
            }
        }
        for (i, (a, _)) in tokens.iter().enumerate() {
            if tokens[i + 1..].iter().any(|(b, _)| a == b) {
                return Err(super::ConfigError::InvalidPlaceholder(format!(
                    "token '{a}' is used for more than one placeholder"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Placeholder {
    fn default() -> Self {
        Self {
            canonical_name: "Float".to_string(),
            lowercase_name: "float".to_string(),
            zero_literal: "0f".to_string(),
            sum_zero_literal: None,
        }
    }
}
