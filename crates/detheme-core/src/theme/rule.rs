//! Per-scope style rules.

use serde::{Deserialize, Deserializer};

use crate::resolve::{resolve, Variables};

/// A scope rule: a selector plus the style settings applied to it.
///
/// Color and style fields hold raw, unevaluated expressions. Empty strings
/// mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Rule {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Scope selector. Opaque to the converter.
    #[serde(deserialize_with = "nullable")]
    pub scope: String,
    #[serde(deserialize_with = "nullable")]
    pub font_style: String,
    #[serde(deserialize_with = "nullable")]
    pub foreground: String,
    #[serde(deserialize_with = "nullable")]
    pub background: String,
    #[serde(deserialize_with = "nullable")]
    pub selection_foreground: String,
}

impl Rule {
    /// Non-empty settings as `(plist key, raw value)` pairs, in the order they
    /// are written to a tmTheme.
    pub fn settings(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("fontStyle", self.font_style.as_str()),
            ("foreground", self.foreground.as_str()),
            ("background", self.background.as_str()),
            ("selectionForeground", self.selection_foreground.as_str()),
        ]
        .into_iter()
        .filter(|(_, raw)| !raw.is_empty())
    }

    /// Non-empty settings with every value resolved against `variables`.
    pub fn resolved_settings(&self, variables: &Variables) -> Vec<(&'static str, String)> {
        self.settings()
            .map(|(key, raw)| (key, resolve(raw, variables)))
            .collect()
    }
}

/// Treats an explicit `null` the same as an absent field.
fn nullable<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
