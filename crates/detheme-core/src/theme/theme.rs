//! The [`Theme`] root and document parsing.

use serde::{Deserialize, Deserializer};

use super::{OrderedMap, Rule};
use crate::error::ParseError;
use crate::resolve::{resolve, Variables};

/// A parsed sublime-color-scheme document.
///
/// Immutable after parsing. Resolved values are derived on demand and never
/// stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Theme {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Empty when the document has no author; the plist then omits the key.
    #[serde(deserialize_with = "nullable")]
    pub author: String,
    /// Lookup-only variable table shared by globals and rules.
    #[serde(deserialize_with = "nullable")]
    pub variables: Variables,
    pub globals: OrderedMap,
    #[serde(deserialize_with = "nullable")]
    pub rules: Vec<Rule>,
}

impl Theme {
    /// Resolves a raw value against this theme's variables.
    pub fn resolve(&self, raw: &str) -> String {
        resolve(raw, &self.variables)
    }

    /// Number of defined variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}

/// Decodes a sublime-color-scheme JSON document.
///
/// Fails on malformed JSON, on a top-level value that is not an object, and
/// on known fields whose shape cannot be decoded (for example `rules` given as
/// a string). Missing fields default to empty.
///
/// ```rust
/// use detheme_core::{parse, ParseError};
///
/// let theme = parse(br#"{"name": "Monokai", "rules": [{"scope": "comment"}]}"#).unwrap();
/// assert_eq!(theme.name, "Monokai");
/// assert_eq!(theme.rules.len(), 1);
///
/// assert!(matches!(parse(b"[1, 2]"), Err(ParseError::NotAnObject { found: "array" })));
/// ```
pub fn parse(bytes: &[u8]) -> Result<Theme, ParseError> {
    let starts_with_brace = bytes
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'{');

    if !starts_with_brace {
        // Either malformed (reported as such) or a valid non-object value.
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        return Err(ParseError::NotAnObject {
            found: json_kind(&value),
        });
    }

    let theme: Theme = serde_json::from_slice(bytes)?;

    tracing::debug!(
        name = %theme.name,
        variables = theme.variables.len(),
        globals = theme.globals.len(),
        rules = theme.rules.len(),
        "parsed theme"
    );

    Ok(theme)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Treats an explicit `null` the same as an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
