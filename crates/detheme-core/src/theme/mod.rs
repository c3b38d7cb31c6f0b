//! In-memory model of a sublime-color-scheme document.
//!
//! A [`Theme`] owns everything decoded from the source: its variables, the
//! global settings ([`OrderedMap`]) and the scope [`Rule`]s. Values are kept
//! raw; resolution happens on demand at serialization time.
//!
//! ## Ownership
//!
//! Variable lookup is theme-scoped, but rules and globals do not point back
//! at their theme. Every accessor that resolves a value takes the variables
//! explicitly:
//!
//! ```rust
//! let theme = detheme_core::parse(br#"{
//!     "name": "Demo",
//!     "variables": { "red": "hsl(0, 100%, 50%)" },
//!     "globals": { "foreground": "var(red)" }
//! }"#).unwrap();
//!
//! assert_eq!(
//!     theme.globals.resolved("foreground", &theme.variables).as_deref(),
//!     Some("#ff0000")
//! );
//! ```
//!
//! ## Ordering
//!
//! `globals` keeps the key order of the source document; `rules` keeps array
//! order. Both orders carry through to the serialized plist.

mod ordered_map;
mod rule;
#[allow(clippy::module_inception)]
mod theme;

pub use ordered_map::OrderedMap;
pub use rule::Rule;
pub use theme::{parse, Theme};
