//! Value resolution: variable expansion and color normalization.
//!
//! [`resolve`] turns a raw theme value such as `color(var(accent) alpha(0.5))`
//! into the canonical hex form a tmTheme consumer understands. It is total:
//! anything that cannot be resolved is replaced by a visible placeholder token
//! (see the `*_PLACEHOLDER` constants) so a conversion always completes and the
//! operator can grep the output for markers.
//!
//! Stages run in a fixed order, each only when its trigger substring is
//! present:
//!
//! 1. `var(NAME)` expansion
//! 2. `color(#HEX alpha(A))`
//! 3. `rgb(r, g, b)`
//! 4. `rgba(r, g, b, a)`
//! 5. `hsl(h, s%, l%)`
//! 6. `hsla(h, s%, l%, a)`
//! 7. Short hex (`#abc`, `#abcd`) doubling
//!
//! Each stage sees the output of every earlier stage, so a variable that
//! expands into `rgb(...)` is normalized, while a color function produced by a
//! later stage is not revisited.
//!
//! # Expansion bound
//!
//! Every stage performs at most [`MAX_PASSES`] find-and-replace passes. Cyclic
//! variable definitions are not detected: expansion simply stops after the
//! last pass and whatever text remains is emitted as is.
//!
//! A value that references itself more than once (`var(a)var(a)`) would still
//! grow geometrically within those passes, so a pass whose result would exceed
//! [`MAX_EXPANDED_LEN`] bytes is skipped and the stage ends there.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::color::Rgba;

/// Variable name to raw value lookup, scoped to one theme.
pub type Variables = HashMap<String, String>;

/// Upper bound on find-and-replace passes per stage.
pub const MAX_PASSES: usize = 16;

/// Upper bound, in bytes, on the text a single stage may produce.
pub const MAX_EXPANDED_LEN: usize = 64 * 1024;

/// Substituted for a malformed color literal or an out-of-range component.
pub const COLOR_VALUE_PLACEHOLDER: &str = "[COLOR-VALUE]";

/// Substituted for an alpha factor that is not a number.
pub const COLOR_ALPHA_PLACEHOLDER: &str = "[COLOR-ALPHA]";

static VAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"var\(([^)]+)\)").unwrap());
static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"color\((#[0-9a-fA-F]{3,8}) alpha\(([0-9.]+)\)\)").unwrap());
static RGB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"rgb\(([0-9]+), *([0-9]+), *([0-9]+)\)").unwrap());
static RGBA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"rgba\(([0-9]+), *([0-9]+), *([0-9]+), *([0-9.]+)\)").unwrap()
});
static HSL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"hsl\(([0-9]+), *([0-9]+)%, *([0-9]+)%\)").unwrap());
static HSLA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"hsla\(([0-9]+), *([0-9]+)%, *([0-9]+)%, *([0-9.]+)\)").unwrap()
});

/// Placeholder for a `var(NAME)` reference with no matching variable.
pub fn unknown_var_placeholder(name: &str) -> String {
    format!("[UNKNOWN-VAR:{}]", name)
}

/// Resolves a raw theme value against the owning theme's variables.
///
/// Never fails and never caches; calling it twice re-runs every stage.
///
/// ```rust
/// use detheme_core::resolve::{resolve, Variables};
///
/// let mut vars = Variables::new();
/// vars.insert("red".into(), "rgb(255, 0, 0)".into());
///
/// assert_eq!(resolve("var(red)", &vars), "#ff0000");
/// assert_eq!(resolve("hsla(0, 100%, 50%, 0.5)", &vars), "#ff000080");
/// assert_eq!(resolve("#abc", &vars), "#aabbcc");
/// ```
pub fn resolve(raw: &str, variables: &Variables) -> String {
    let mut data = raw.to_string();

    if data.contains("var(") {
        data = replace_passes(data, &VAR_RE, |caps| {
            let name = &caps[1];
            match variables.get(name) {
                Some(value) => value.clone(),
                None => {
                    tracing::warn!(variable = name, "unknown variable");
                    unknown_var_placeholder(name)
                }
            }
        });
    }

    if data.contains("color(") {
        data = replace_passes(data, &COLOR_RE, |caps| {
            let base = match Rgba::parse_hex(&caps[1]) {
                Ok(base) => base,
                Err(reason) => {
                    tracing::warn!(%reason, "invalid color() base");
                    return COLOR_VALUE_PLACEHOLDER.to_string();
                }
            };
            match parse_alpha(&caps[2]) {
                Some(alpha) => base.with_alpha(alpha).to_hex(),
                None => COLOR_ALPHA_PLACEHOLDER.to_string(),
            }
        });
    }

    if data.contains("rgb(") {
        data = replace_passes(data, &RGB_RE, |caps| match components(caps) {
            Some([r, g, b]) => Rgba::rgb(r, g, b).to_hex(),
            None => COLOR_VALUE_PLACEHOLDER.to_string(),
        });
    }

    if data.contains("rgba(") {
        data = replace_passes(data, &RGBA_RE, |caps| {
            let Some([r, g, b]) = components(caps) else {
                return COLOR_VALUE_PLACEHOLDER.to_string();
            };
            match parse_alpha(&caps[4]) {
                Some(alpha) => Rgba::rgb(r, g, b).with_alpha(alpha).to_hex(),
                None => COLOR_ALPHA_PLACEHOLDER.to_string(),
            }
        });
    }

    if data.contains("hsl(") {
        data = replace_passes(data, &HSL_RE, |caps| {
            let (h, s, l) = hsl_components(caps);
            Rgba::from_hsl(h, s, l).to_hex()
        });
    }

    if data.contains("hsla(") {
        data = replace_passes(data, &HSLA_RE, |caps| {
            let (h, s, l) = hsl_components(caps);
            match parse_alpha(&caps[4]) {
                Some(alpha) => Rgba::from_hsl(h, s, l).with_alpha(alpha).to_hex(),
                None => COLOR_ALPHA_PLACEHOLDER.to_string(),
            }
        });
    }

    expand_short_hex(data)
}

/// Repeatedly replaces the first match of `re` (and every identical
/// occurrence of it) until nothing matches, [`MAX_PASSES`] is reached, or the
/// next pass would grow the text past [`MAX_EXPANDED_LEN`].
fn replace_passes<F>(mut data: String, re: &Regex, mut replacement: F) -> String
where
    F: FnMut(&Captures<'_>) -> String,
{
    for _ in 0..MAX_PASSES {
        let Some(caps) = re.captures(&data) else {
            break;
        };
        let matched = caps[0].to_string();
        let value = replacement(&caps);

        if value.len() > matched.len() {
            let count = data.matches(matched.as_str()).count();
            let grown = data.len() + count * (value.len() - matched.len());
            if grown > MAX_EXPANDED_LEN {
                tracing::warn!(
                    pattern = %matched,
                    len = grown,
                    limit = MAX_EXPANDED_LEN,
                    "expansion too large, stopping"
                );
                break;
            }
        }

        data = data.replace(&matched, &value);
    }
    data
}

/// Reads three 0-255 integer components from capture groups 1-3.
fn components(caps: &Captures<'_>) -> Option<[u8; 3]> {
    let mut out = [0u8; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        let raw = &caps[i + 1];
        match raw.parse::<u8>() {
            Ok(v) => *slot = v,
            Err(_) => {
                tracing::warn!(component = raw, "color component out of range (0-255)");
                return None;
            }
        }
    }
    Some(out)
}

/// Reads hue, saturation and lightness from capture groups 1-3.
///
/// The groups are digit-only and always parse as `f64`.
fn hsl_components(caps: &Captures<'_>) -> (f64, f64, f64) {
    let num = |i: usize| caps[i].parse::<f64>().unwrap_or(0.0);
    (num(1), num(2), num(3))
}

fn parse_alpha(raw: &str) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(alpha) => Some(alpha),
        Err(_) => {
            tracing::warn!(alpha = raw, "invalid alpha value");
            None
        }
    }
}

/// Doubles every digit of a `#rgb` / `#rgba` value. Anything else is returned
/// unchanged.
fn expand_short_hex(data: String) -> String {
    let expanded = data
        .strip_prefix('#')
        .filter(|digits| matches!(digits.len(), 3 | 4))
        .filter(|digits| digits.bytes().all(|b| b.is_ascii_hexdigit()))
        .map(|digits| {
            let mut out = String::with_capacity(1 + digits.len() * 2);
            out.push('#');
            for c in digits.chars().map(|c| c.to_ascii_lowercase()) {
                out.push(c);
                out.push(c);
            }
            out
        });

    expanded.unwrap_or(data)
}
