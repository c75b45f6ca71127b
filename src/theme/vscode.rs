//! The VS Code theme schema and its scope-based color resolution.
//!
//! A VS Code theme is a flat `colors` map (workbench keys) plus an ordered
//! `tokenColors` rule list (TextMate scopes). Rule order is significant:
//! resolution always takes the first rule whose scope list matches, never a
//! later one and never a merge.
//!
//! Scope naming conventions: <https://macromates.com/manual/en/language_grammars>

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color::Color;
use crate::error::Error;
use crate::lenient;
use crate::theme::{ConvertOptions, Palette, Theme};

/// Default cursor color VS Code uses for dark themes
/// (vscode/src/vs/editor/common/view/editorColorRegistry.ts).
const DEFAULT_DARK_CURSOR: &str = "#AEAFAD";

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// A parsed VS Code theme.
#[derive(Debug, Clone)]
pub struct VsCodeTheme {
    pub content: Content,
}

/// The theme file structure as written on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `"dark"`, `"light"`, or anything else (treated as light).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Workbench colors. A key may be present with an explicit `null`,
    /// which resolution treats the same as absent.
    #[serde(default)]
    pub colors: BTreeMap<String, Option<String>>,
    /// Scoped rules, in document order. Order must be preserved exactly.
    #[serde(default, rename = "tokenColors")]
    pub token_colors: Vec<TokenColor>,
}

/// One scoped rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenColor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<BTreeMap<String, String>>,
}

impl TokenColor {
    fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope
            .iter()
            .flat_map(|list| list.0.iter())
            .map(String::as_str)
    }

    fn foreground(&self) -> Option<&str> {
        self.settings.as_ref()?.get("foreground").map(String::as_str)
    }
}

/// A rule's scope field: either one string or a list of strings in the
/// file; always a list in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeList(pub Vec<String>);

impl<'de> Deserialize<'de> for ScopeList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(String),
            Many(Vec<String>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::One(scope) => ScopeList(vec![scope]),
            Raw::Many(scopes) => ScopeList(scopes),
        })
    }
}

impl Serialize for ScopeList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// A resolution directive, parsed from the key notation:
/// `"k"` exact, `"k."` prefix, `"k~"` exact then prefix.
#[derive(Debug, Clone, Copy, PartialEq)]
enum KeySpec<'a> {
    /// Literal lookup in `colors`, then first rule whose scope list
    /// contains the key exactly.
    Exact(&'a str),
    /// First rule with any scope starting with the pattern (trailing dot
    /// included). `colors` is not prefix-searched.
    Prefix(&'a str),
    /// `Exact(k)`, then `Prefix(k.)` on a miss.
    ExactThenPrefix(&'a str),
}

impl<'a> KeySpec<'a> {
    fn parse(key: &'a str) -> KeySpec<'a> {
        if let Some(base) = key.strip_suffix('~') {
            KeySpec::ExactThenPrefix(base)
        } else if key.ends_with('.') {
            KeySpec::Prefix(key)
        } else {
            KeySpec::Exact(key)
        }
    }
}

impl Content {
    /// Resolve an ordered candidate list; the first key that yields a color
    /// wins. A miss across the whole list is not an error.
    fn resolve(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.resolve_key(key))
    }

    fn resolve_key(&self, key: &str) -> Option<&str> {
        match KeySpec::parse(key) {
            KeySpec::Exact(k) => self.exact(k),
            KeySpec::Prefix(pattern) => self.prefix(pattern),
            KeySpec::ExactThenPrefix(base) => self
                .exact(base)
                .or_else(|| self.prefix(&format!("{base}."))),
        }
    }

    fn exact(&self, key: &str) -> Option<&str> {
        // Present-but-null counts as not found.
        if let Some(hex) = self.colors.get(key).and_then(|value| value.as_deref()) {
            return Some(hex);
        }

        let rule = self
            .token_colors
            .iter()
            .find(|rule| rule.scopes().any(|scope| scope == key))?;
        // The first scope-matching rule decides, even when it carries no
        // foreground; later rules are not consulted for this key.
        rule.foreground()
    }

    fn prefix(&self, pattern: &str) -> Option<&str> {
        let rule = self
            .token_colors
            .iter()
            .find(|rule| rule.scopes().any(|scope| scope.starts_with(pattern)))?;
        rule.foreground()
    }
}

// ---------------------------------------------------------------------------
// Palette assembly
// ---------------------------------------------------------------------------

impl VsCodeTheme {
    pub fn is_dark(&self) -> bool {
        self.content.kind.as_deref() == Some("dark")
    }

    fn color(&self, keys: &[&str], options: &ConvertOptions) -> Option<Color> {
        let hex = self.content.resolve(keys)?;
        // Unparseable hex is a miss, not a hard error.
        let color = Color::from_hex(hex)?;
        Some(if options.skip_color_profile_correction {
            color
        } else {
            color.using_display_profile()
        })
    }
}

impl Theme for VsCodeTheme {
    fn read(data: &[u8]) -> Result<Self, Error> {
        let text = std::str::from_utf8(data).map_err(|_| Error::InvalidInput)?;
        let content = lenient::decode(text)?;
        Ok(VsCodeTheme { content })
    }

    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec_pretty(&self.content).map_err(|e| Error::Parse(e.to_string()))
    }

    fn from_palette(_palette: &Palette) -> Result<Self, Error> {
        Err(Error::UnsupportedConversion(
            "a palette cannot be rendered back into a VS Code theme",
        ))
    }

    fn palette(&self, options: &ConvertOptions) -> Result<Palette, Error> {
        let dark = self.is_dark();
        let default_background = if dark { Color::BLACK } else { Color::WHITE };
        let default_text = if dark { Color::WHITE } else { Color::BLACK };
        let default_cursor = if dark {
            Color::from_hex(DEFAULT_DARK_CURSOR).unwrap_or(Color::WHITE)
        } else {
            Color::BLACK
        };

        let color = |keys: &[&str]| self.color(keys, options);

        Ok(Palette {
            background: color(&["editor.background"]).unwrap_or(default_background),
            current_line_background: color(&["editor.lineHighlightBackground"]),
            selection: color(&["editor.selectionBackground"]),
            cursor: Some(color(&["editorCursor.foreground"]).unwrap_or(default_cursor)),
            invisibles: color(&["editorWhitespace.foreground"]),
            text: color(&["editor.foreground", "foreground"]).unwrap_or(default_text),
            comment: color(&["comment~"]),
            documentation: color(&[
                "comment.block.documentation~",
                "comment.block~",
                "comment~",
            ]),
            string: color(&["string.quoted", "string", "string.quoted.", "string."]),
            character: color(&["constant.character", "constant"]),
            number: color(&[
                "constant.numeric",
                "constant.character.numeric",
                "constant",
                "constant.numeric.",
                "constant.character.numeric.",
                "constant.",
            ]),
            keyword: color(&[
                "keyword.control",
                "keyword.other",
                "keyword",
                "keyword.control.",
                "keyword.other.",
                "keyword.",
                "storage~",
            ]),
            variable: color(&["variable", "variable.other~"]),
            preprocessor: color(&[
                "entity.name.function.preprocessor~",
                "entity.name.type~",
            ]),
            declaration_type: color(&["entity.name.type~"]),
            declaration_other: color(&["entity.name.function~"]),
            class_name_project: color(&[
                "variable.other.constant~",
                "variable.other~",
                "variable",
            ]),
            function_name_project: color(&["variable.function~", "variable"]),
            constant_project: color(&["entity.name.constant~", "variable.other.constant~"]),
            type_name_project: color(&[
                "variable.other.constant~",
                "variable.other~",
                "variable",
            ]),
            class_name_library: color(&["support.class~"]),
            function_name_library: color(&["support.function~"]),
            constant_library: color(&["support.constant~", "constant.language~"]),
            type_name_library: color(&["support.type~"]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content(value: serde_json::Value) -> Content {
        serde_json::from_value(value).expect("test content")
    }

    fn rules(list: serde_json::Value) -> Content {
        content(json!({ "colors": {}, "tokenColors": list }))
    }

    #[test]
    fn scope_list_promotes_single_string() {
        let c = rules(json!([
            { "scope": "comment", "settings": { "foreground": "#111111" } }
        ]));
        assert_eq!(
            c.token_colors[0].scope,
            Some(ScopeList(vec!["comment".into()]))
        );
    }

    #[test]
    fn explicit_color_wins_over_rules() {
        let c = content(json!({
            "colors": { "comment": "#222222" },
            "tokenColors": [
                { "scope": "comment", "settings": { "foreground": "#111111" } }
            ]
        }));
        assert_eq!(c.resolve(&["comment"]), Some("#222222"));
    }

    #[test]
    fn present_but_null_falls_through_to_prefix_match() {
        let c = content(json!({
            "colors": { "a": null },
            "tokenColors": [
                { "scope": "a.b", "settings": { "foreground": "#334455" } }
            ]
        }));
        assert_eq!(c.resolve(&["a", "a."]), Some("#334455"));
    }

    #[test]
    fn first_matching_rule_wins() {
        let c = rules(json!([
            { "scope": "string.quoted", "settings": { "foreground": "#111111" } },
            { "scope": "string.template", "settings": { "foreground": "#222222" } }
        ]));
        assert_eq!(c.resolve(&["string."]), Some("#111111"));
    }

    #[test]
    fn first_matching_rule_without_foreground_is_a_miss_for_that_key() {
        let c = rules(json!([
            { "scope": "keyword", "settings": { "fontStyle": "bold" } },
            { "scope": "keyword", "settings": { "foreground": "#222222" } }
        ]));
        // Exact match stops at the first `keyword` rule.
        assert_eq!(c.resolve(&["keyword"]), None);
        // The next candidate can still hit.
        assert_eq!(c.resolve(&["keyword", "keyword."]), None);
        assert_eq!(c.resolve(&["keyword", "storage~"]), None);
    }

    #[test]
    fn prefix_does_not_search_explicit_colors() {
        let c = content(json!({
            "colors": { "string.quoted": "#111111" },
            "tokenColors": []
        }));
        assert_eq!(c.resolve(&["string."]), None);
    }

    #[test]
    fn exact_then_prefix_equals_two_call_composition() {
        let c = rules(json!([
            { "scope": ["comment.line", "comment.block"], "settings": { "foreground": "#445566" } },
            { "scope": "comment", "settings": { "foreground": "#778899" } }
        ]));
        let composed = c.resolve(&["comment"]).or_else(|| c.resolve(&["comment."]));
        assert_eq!(c.resolve(&["comment~"]), composed);
        assert_eq!(c.resolve(&["comment~"]), Some("#778899"));

        let miss_then_prefix = c.resolve(&["string~"]);
        assert_eq!(
            miss_then_prefix,
            c.resolve(&["string"]).or_else(|| c.resolve(&["string."]))
        );
    }

    #[test]
    fn keyspec_notation_parses() {
        assert_eq!(KeySpec::parse("keyword"), KeySpec::Exact("keyword"));
        assert_eq!(KeySpec::parse("keyword."), KeySpec::Prefix("keyword."));
        assert_eq!(
            KeySpec::parse("keyword~"),
            KeySpec::ExactThenPrefix("keyword")
        );
    }

    #[test]
    fn dark_defaults_apply_when_roles_are_absent() {
        let theme = VsCodeTheme {
            content: content(json!({ "type": "dark" })),
        };
        let palette = theme.palette(&ConvertOptions::default()).unwrap();
        assert_eq!(palette.background, Color::BLACK);
        assert_eq!(palette.text, Color::WHITE);
        assert_eq!(palette.cursor, Color::from_hex("#AEAFAD"));
        assert_eq!(palette.comment, None);
    }

    #[test]
    fn light_defaults_apply_when_roles_are_absent() {
        let theme = VsCodeTheme {
            content: content(json!({ "type": "light" })),
        };
        let palette = theme.palette(&ConvertOptions::default()).unwrap();
        assert_eq!(palette.background, Color::WHITE);
        assert_eq!(palette.text, Color::BLACK);
        assert_eq!(palette.cursor, Some(Color::BLACK));
    }

    #[test]
    fn unknown_theme_kind_uses_light_defaults() {
        let theme = VsCodeTheme {
            content: content(json!({ "type": "hcDark" })),
        };
        let palette = theme.palette(&ConvertOptions::default()).unwrap();
        assert_eq!(palette.background, Color::WHITE);
    }

    #[test]
    fn unparseable_hex_is_treated_as_absent() {
        let theme = VsCodeTheme {
            content: content(json!({
                "type": "dark",
                "colors": { "editor.background": "not-a-color" }
            })),
        };
        let palette = theme.palette(&ConvertOptions::default()).unwrap();
        assert_eq!(palette.background, Color::BLACK);
    }

    #[test]
    fn palette_resolves_roles_from_rules() {
        let theme = VsCodeTheme {
            content: content(json!({
                "type": "dark",
                "colors": { "editor.background": "#112233" },
                "tokenColors": [
                    { "scope": "comment", "settings": { "foreground": "#556677" } },
                    { "scope": ["string.quoted.double"], "settings": { "foreground": "#889900" } }
                ]
            })),
        };
        let palette = theme.palette(&ConvertOptions::default()).unwrap();
        assert_eq!(palette.background, Color::from_hex("#112233").unwrap());
        assert_eq!(palette.comment, Color::from_hex("#556677"));
        // `string.quoted` misses exactly, `string.quoted.` hits by prefix.
        assert_eq!(palette.string, Color::from_hex("#889900"));
        assert_eq!(palette.text, Color::WHITE);
    }

    #[test]
    fn skip_correction_copies_components_verbatim() {
        let theme = VsCodeTheme {
            content: content(json!({
                "type": "dark",
                "colors": { "editor.background": "#112233" }
            })),
        };
        let corrected = theme.palette(&ConvertOptions::default()).unwrap();
        let skipped = theme
            .palette(&ConvertOptions {
                skip_color_profile_correction: true,
            })
            .unwrap();
        // Headless the correction is a pass-through, so both paths agree.
        assert_eq!(corrected, skipped);
    }

    #[test]
    fn read_rejects_non_utf8_bytes() {
        let err = VsCodeTheme::read(&[0xFF, 0xFE, 0x00]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput));
    }

    #[test]
    fn read_decodes_commented_theme() {
        let raw = br##"{
            // a dark theme
            "type": "dark",
            "colors": { "editor.background": "#112233" }, /* inline */
            "tokenColors": []
        }"##;
        let theme = VsCodeTheme::read(raw).unwrap();
        assert!(theme.is_dark());
    }

    #[test]
    fn from_palette_is_unsupported() {
        let palette = Palette::minimal(Color::BLACK, Color::WHITE);
        assert!(matches!(
            VsCodeTheme::from_palette(&palette),
            Err(Error::UnsupportedConversion(_))
        ));
    }

    #[test]
    fn round_trips_through_bytes() {
        let theme = VsCodeTheme {
            content: content(json!({
                "name": "Test",
                "type": "dark",
                "colors": { "editor.background": "#112233" },
                "tokenColors": [
                    { "scope": "comment", "settings": { "foreground": "#556677" } }
                ]
            })),
        };
        let bytes = theme.to_bytes().unwrap();
        let reread = VsCodeTheme::read(&bytes).unwrap();
        assert_eq!(reread.content.name.as_deref(), Some("Test"));
        assert_eq!(reread.content.token_colors.len(), 1);
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        fn scope_name() -> impl Strategy<Value = String> {
            proptest::string::string_regex("[a-c]{1,2}(\\.[a-c]{1,2}){0,2}").expect("regex")
        }

        proptest! {
            #[test]
            fn exact_then_prefix_matches_composition(
                scopes in proptest::collection::vec(scope_name(), 0..6),
                base in scope_name(),
            ) {
                let token_colors = scopes
                    .iter()
                    .enumerate()
                    .map(|(i, scope)| {
                        serde_json::json!({
                            "scope": scope,
                            "settings": { "foreground": format!("#0000{i:02X}") }
                        })
                    })
                    .collect::<Vec<_>>();
                let c: Content = serde_json::from_value(serde_json::json!({
                    "colors": {},
                    "tokenColors": token_colors
                })).expect("content");

                let tilde = format!("{base}~");
                let dotted = format!("{base}.");
                let combined = c.resolve(&[tilde.as_str()]).map(str::to_owned);
                let composed = c
                    .resolve(&[base.as_str()])
                    .or_else(|| c.resolve(&[dotted.as_str()]))
                    .map(str::to_owned);
                prop_assert_eq!(combined, composed);
            }
        }
    }
}
