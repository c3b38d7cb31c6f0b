//! tmTheme (XML property list) serialization.
//!
//! [`PlistSerializer`] walks a [`Theme`] and writes a property list with a
//! fixed layout:
//!
//! 1. XML declaration, plist DOCTYPE and a provenance comment
//! 2. Root `dict` with `name`, `author` (omitted when empty), `colorSpaceName`
//!    (`sRGB`) and `uuid`
//! 3. `settings` array: one dict holding the globals, then one dict per rule
//!
//! Every color and style value is resolved right before it is written, through
//! [`OrderedMap::resolved`](crate::OrderedMap::resolved) for globals and
//! [`Rule::resolved_settings`] for rules. Keys and values are XML-escaped with
//! `&` handled first, so a literal `'` becomes `&apos;` and never
//! `&amp;apos;`.
//!
//! The theme UUID is random per call unless pinned with
//! [`PlistSerializer::with_uuid`], which makes output byte-for-byte
//! reproducible.

use quick_xml::escape::escape;
use uuid::Uuid;

use crate::theme::{Rule, Theme};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const DOCTYPE: &str = r#"<!DOCTYPE plist PUBLIC "-//Apple Computer//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">"#;
const PROVENANCE: &str = "This theme converted from sublime-color-scheme by detheme";
const INDENT: &str = "  ";

/// Serializes themes into tmTheme bytes.
#[derive(Debug, Clone, Default)]
pub struct PlistSerializer {
    uuid: Option<Uuid>,
}

impl PlistSerializer {
    /// A serializer that generates a fresh v4 UUID for every theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// A serializer that always writes `uuid`.
    pub fn with_uuid(uuid: Uuid) -> Self {
        Self { uuid: Some(uuid) }
    }

    /// Serializes `theme` as UTF-8 XML bytes. Never fails.
    pub fn serialize(&self, theme: &Theme) -> Vec<u8> {
        self.serialize_to_string(theme).into_bytes()
    }

    /// Serializes `theme` as an XML string.
    pub fn serialize_to_string(&self, theme: &Theme) -> String {
        let uuid = self.uuid.unwrap_or_else(Uuid::new_v4);
        tracing::debug!(%uuid, rules = theme.rules.len(), "serializing theme");

        let mut w = PlistWriter::default();
        w.header();
        w.line(0, r#"<plist version="1.0">"#);
        w.open(1, "dict");

        w.node(2, "name", &theme.name);
        if !theme.author.is_empty() {
            w.node(2, "author", &theme.author);
        }
        w.node(2, "colorSpaceName", "sRGB");
        w.node(2, "uuid", &uuid.to_string());

        w.key(2, "settings");
        w.open(2, "array");

        w.open(3, "dict");
        w.key(4, "settings");
        w.open(4, "dict");
        for key in theme.globals.keys() {
            if let Some(value) = theme.globals.resolved(key, &theme.variables) {
                w.node(5, key, &value);
            }
        }
        w.close(4, "dict");
        w.close(3, "dict");

        for rule in &theme.rules {
            w.rule(rule, theme);
        }

        w.close(2, "array");
        w.close(1, "dict");
        w.line(0, "</plist>");

        w.out
    }
}

/// Serializes `theme` with a random UUID.
pub fn serialize(theme: &Theme) -> Vec<u8> {
    PlistSerializer::new().serialize(theme)
}

/// Line-oriented plist builder.
#[derive(Default)]
struct PlistWriter {
    out: String,
}

impl PlistWriter {
    fn header(&mut self) {
        self.line(0, XML_DECLARATION);
        self.line(0, DOCTYPE);
        self.blank();
        self.line(0, "<!--");
        self.line(1, PROVENANCE);
        self.line(0, "-->");
        self.blank();
    }

    fn rule(&mut self, rule: &Rule, theme: &Theme) {
        self.open(3, "dict");
        if !rule.name.is_empty() {
            self.node(4, "name", &rule.name);
        }
        if !rule.scope.is_empty() {
            self.node(4, "scope", &rule.scope);
        }
        self.key(4, "settings");
        self.open(4, "dict");
        for (key, value) in rule.resolved_settings(&theme.variables) {
            self.node(5, key, &value);
        }
        self.close(4, "dict");
        self.close(3, "dict");
    }

    /// Writes a `<key>` / `<string>` pair.
    fn node(&mut self, depth: usize, key: &str, value: &str) {
        self.key(depth, key);
        self.line(depth, &format!("<string>{}</string>", escape(value)));
    }

    fn key(&mut self, depth: usize, key: &str) {
        self.line(depth, &format!("<key>{}</key>", escape(key)));
    }

    fn open(&mut self, depth: usize, tag: &str) {
        self.line(depth, &format!("<{}>", tag));
    }

    fn close(&mut self, depth: usize, tag: &str) {
        self.line(depth, &format!("</{}>", tag));
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::OrderedMap;

    fn fixed() -> PlistSerializer {
        PlistSerializer::with_uuid(Uuid::nil())
    }

    #[test]
    fn test_full_document_layout() {
        let mut theme = Theme {
            name: "Tiny".into(),
            author: "Me".into(),
            globals: [("background", "var(bg)"), ("foreground", "#abc")]
                .into_iter()
                .collect(),
            rules: vec![Rule {
                name: "Comment".into(),
                scope: "comment".into(),
                font_style: "italic".into(),
                foreground: "rgb(255, 0, 0)".into(),
                ..Rule::default()
            }],
            ..Theme::default()
        };
        theme.variables.insert("bg".into(), "#000".into());

        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple Computer//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">

<!--
  This theme converted from sublime-color-scheme by detheme
-->

<plist version="1.0">
  <dict>
    <key>name</key>
    <string>Tiny</string>
    <key>author</key>
    <string>Me</string>
    <key>colorSpaceName</key>
    <string>sRGB</string>
    <key>uuid</key>
    <string>00000000-0000-0000-0000-000000000000</string>
    <key>settings</key>
    <array>
      <dict>
        <key>settings</key>
        <dict>
          <key>background</key>
          <string>#000000</string>
          <key>foreground</key>
          <string>#aabbcc</string>
        </dict>
      </dict>
      <dict>
        <key>name</key>
        <string>Comment</string>
        <key>scope</key>
        <string>comment</string>
        <key>settings</key>
        <dict>
          <key>fontStyle</key>
          <string>italic</string>
          <key>foreground</key>
          <string>#ff0000</string>
        </dict>
      </dict>
    </array>
  </dict>
</plist>
"#;

        assert_eq!(fixed().serialize_to_string(&theme), expected);
    }

    #[test]
    fn test_author_omitted_when_empty() {
        let theme = Theme {
            name: "NoAuthor".into(),
            ..Theme::default()
        };
        let out = fixed().serialize_to_string(&theme);
        assert!(!out.contains("<key>author</key>"));
        assert!(out.contains("<key>name</key>\n    <string>NoAuthor</string>"));
    }

    #[test]
    fn test_escaping_ampersand_first() {
        let theme = Theme {
            rules: vec![Rule {
                name: "O'Brien & Co. <test>".into(),
                ..Rule::default()
            }],
            ..Theme::default()
        };
        let out = fixed().serialize_to_string(&theme);
        assert!(out.contains("<string>O&apos;Brien &amp; Co. &lt;test&gt;</string>"));
        assert!(!out.contains("&amp;apos;"));
    }

    #[test]
    fn test_escaping_quotes_in_keys() {
        let theme = Theme {
            globals: [("say \"hi\"", "a > b")].into_iter().collect(),
            ..Theme::default()
        };
        let out = fixed().serialize_to_string(&theme);
        assert!(out.contains("<key>say &quot;hi&quot;</key>"));
        assert!(out.contains("<string>a &gt; b</string>"));
        assert!(!out.contains("&amp;quot;"));
    }

    #[test]
    fn test_globals_keep_source_order() {
        let globals: OrderedMap = [("b", "1"), ("a", "2"), ("c", "3")].into_iter().collect();
        let theme = Theme {
            globals,
            ..Theme::default()
        };
        let out = fixed().serialize_to_string(&theme);
        let pos = |k: &str| out.find(&format!("<key>{}</key>", k)).unwrap();
        assert!(pos("b") < pos("a"));
        assert!(pos("a") < pos("c"));
    }

    #[test]
    fn test_empty_rule_fields_omitted() {
        let theme = Theme {
            rules: vec![Rule {
                scope: "markup".into(),
                background: "#111".into(),
                ..Rule::default()
            }],
            ..Theme::default()
        };
        let out = fixed().serialize_to_string(&theme);
        assert!(out.contains("<key>scope</key>"));
        assert!(out.contains("<key>background</key>\n          <string>#111111</string>"));
        assert!(!out.contains("<key>fontStyle</key>"));
        assert!(!out.contains("<key>foreground</key>"));
        assert!(!out.contains("<key>selectionForeground</key>"));
    }

    #[test]
    fn test_written_values_match_resolved_accessors() {
        let mut theme = Theme {
            globals: [("caret", "color(var(accent) alpha(0.5))"), ("gutter", "var(nope)")]
                .into_iter()
                .collect(),
            rules: vec![Rule {
                scope: "keyword".into(),
                foreground: "var(accent)".into(),
                background: "hsla(0, 100%, 50%, 0.25)".into(),
                ..Rule::default()
            }],
            ..Theme::default()
        };
        theme.variables.insert("accent".into(), "#f80".into());
        let out = fixed().serialize_to_string(&theme);

        for key in theme.globals.keys() {
            let value = theme.globals.resolved(key, &theme.variables).unwrap();
            let node = format!("<key>{}</key>\n          <string>{}</string>", key, value);
            assert!(out.contains(&node), "missing {}", node);
        }
        for (key, value) in theme.rules[0].resolved_settings(&theme.variables) {
            let node = format!("<key>{}</key>\n          <string>{}</string>", key, value);
            assert!(out.contains(&node), "missing {}", node);
        }
        assert!(out.contains("<string>#ff880080</string>"));
        assert!(out.contains("<string>[UNKNOWN-VAR:nope]</string>"));
    }

    #[test]
    fn test_random_uuid_per_call() {
        let theme = Theme::default();
        let serializer = PlistSerializer::new();
        assert_ne!(serializer.serialize(&theme), serializer.serialize(&theme));
    }

    #[test]
    fn test_pinned_uuid_is_deterministic() {
        let theme = Theme {
            name: "Same".into(),
            ..Theme::default()
        };
        let uuid = Uuid::from_u128(0x1234_5678_9abc_def0_1234_5678_9abc_def0);
        let a = PlistSerializer::with_uuid(uuid).serialize(&theme);
        let b = PlistSerializer::with_uuid(uuid).serialize(&theme);
        assert_eq!(a, b);
        assert!(String::from_utf8(a)
            .unwrap()
            .contains("<string>12345678-9abc-def0-1234-56789abcdef0</string>"));
    }
}
