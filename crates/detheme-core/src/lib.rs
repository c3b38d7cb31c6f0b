//! # detheme-core - sublime-color-scheme to tmTheme conversion
//!
//! `detheme-core` converts a JSON sublime-color-scheme document into the older
//! XML property-list tmTheme format. It has no file-system, environment or
//! process dependencies: callers hand in bytes and get bytes back.
//!
//! ## Core Concepts
//!
//! - [`Theme`]: the parsed document (variables, ordered globals, rules)
//! - [`resolve()`](resolve::resolve): expands `var(...)` references and
//!   normalizes `color()`, `rgb()`, `rgba()`, `hsl()`, `hsla()` and short hex
//!   into canonical `#rrggbb` / `#rrggbbaa`
//! - [`PlistSerializer`]: writes the tmTheme, resolving each value as it goes
//!
//! ## Quick Start
//!
//! ```rust
//! use detheme_core::{parse, PlistSerializer};
//! use uuid::Uuid;
//!
//! let theme = parse(br##"{
//!     "name": "Ember",
//!     "variables": { "orange": "#f80" },
//!     "globals": { "foreground": "color(var(orange) alpha(0.5))" },
//!     "rules": [{ "scope": "comment", "font_style": "italic" }]
//! }"##).unwrap();
//!
//! let xml = PlistSerializer::with_uuid(Uuid::nil()).serialize_to_string(&theme);
//! assert!(xml.contains("<string>#ff880080</string>"));
//! ```
//!
//! ## Error Policy
//!
//! Only [`parse`] can fail. Unknown variables and malformed color literals are
//! replaced with placeholder tokens (`[UNKNOWN-VAR:name]`, `[COLOR-VALUE]`,
//! `[COLOR-ALPHA]`) and logged through `tracing`, so a conversion always
//! produces a complete document.

pub mod color;
pub mod error;
pub mod plist;
pub mod resolve;
pub mod theme;

pub use error::ParseError;
pub use plist::{serialize, PlistSerializer};
pub use resolve::Variables;
pub use theme::{parse, OrderedMap, Rule, Theme};

/// Parses a sublime-color-scheme document and serializes it as a tmTheme with
/// a random UUID.
pub fn convert(bytes: &[u8]) -> Result<Vec<u8>, ParseError> {
    let theme = parse(bytes)?;
    Ok(serialize(&theme))
}
