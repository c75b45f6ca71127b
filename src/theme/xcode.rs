//! The Xcode theme schema and the palette → Xcode mapping.
//!
//! `.xccolortheme` is a fixed-key XML plist: five `DVTSourceText*` editor
//! colors plus a nested `DVTSourceTextSyntaxColors` dict of `xcode.syntax.*`
//! roles, every color in the component-string encoding. The Xcode taxonomy
//! is coarser than the canonical palette, so the mapping collapses several
//! palette roles onto one key and the reverse direction is refused outright
//! rather than silently losing information.

use crate::color::Color;
use crate::error::Error;
use crate::plist::{self, Dict, Value};
use crate::theme::{ConvertOptions, Palette, Theme};

const KEY_BACKGROUND: &str = "DVTSourceTextBackground";
const KEY_CURRENT_LINE: &str = "DVTSourceTextCurrentLineHighlightColor";
const KEY_SELECTION: &str = "DVTSourceTextSelectionColor";
const KEY_CURSOR: &str = "DVTSourceTextInsertionPointColor";
const KEY_INVISIBLES: &str = "DVTSourceTextInvisiblesColor";
const KEY_SYNTAX_COLORS: &str = "DVTSourceTextSyntaxColors";

/// A parsed or freshly mapped Xcode theme.
#[derive(Debug, Clone, PartialEq)]
pub struct XcodeTheme {
    pub content: Content,
}

/// The theme file structure: top-level editor colors plus syntax roles.
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub background: String,
    pub current_line_background: Option<String>,
    pub selection: Option<String>,
    pub cursor: Option<String>,
    pub invisibles: Option<String>,
    pub syntax_colors: SyntaxColors,
}

/// The `xcode.syntax.*` dict. "Project" roles cover identifiers defined in
/// the open project, the `.system` variants cover imported ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntaxColors {
    pub text: Option<String>,
    pub comment: Option<String>,
    pub documentation: Option<String>,
    pub documentation_keyword: Option<String>,
    pub mark: Option<String>,
    pub string: Option<String>,
    pub character: Option<String>,
    pub number: Option<String>,
    pub keyword: Option<String>,
    pub preprocessor: Option<String>,
    pub url: Option<String>,
    pub attribute: Option<String>,
    pub declaration_type: Option<String>,
    pub declaration_other: Option<String>,
    pub class_name_project: Option<String>,
    pub function_name_project: Option<String>,
    pub constant_project: Option<String>,
    pub type_name_project: Option<String>,
    pub instance_variable_project: Option<String>,
    pub preprocessor_macro_project: Option<String>,
    pub class_name_system: Option<String>,
    pub function_name_system: Option<String>,
    pub constant_system: Option<String>,
    pub type_name_system: Option<String>,
    pub instance_variable_system: Option<String>,
    pub preprocessor_macro_system: Option<String>,
}

impl SyntaxColors {
    /// Key/field pairs in the order Xcode writes them.
    fn pairs(&self) -> [(&'static str, &Option<String>); 26] {
        [
            ("xcode.syntax.plain", &self.text),
            ("xcode.syntax.comment", &self.comment),
            ("xcode.syntax.comment.doc", &self.documentation),
            ("xcode.syntax.comment.doc.keyword", &self.documentation_keyword),
            ("xcode.syntax.mark", &self.mark),
            ("xcode.syntax.string", &self.string),
            ("xcode.syntax.character", &self.character),
            ("xcode.syntax.number", &self.number),
            ("xcode.syntax.keyword", &self.keyword),
            ("xcode.syntax.preprocessor", &self.preprocessor),
            ("xcode.syntax.url", &self.url),
            ("xcode.syntax.attribute", &self.attribute),
            ("xcode.syntax.declaration.type", &self.declaration_type),
            ("xcode.syntax.declaration.other", &self.declaration_other),
            ("xcode.syntax.identifier.class", &self.class_name_project),
            ("xcode.syntax.identifier.function", &self.function_name_project),
            ("xcode.syntax.identifier.constant", &self.constant_project),
            ("xcode.syntax.identifier.type", &self.type_name_project),
            ("xcode.syntax.identifier.variable", &self.instance_variable_project),
            ("xcode.syntax.identifier.macro", &self.preprocessor_macro_project),
            ("xcode.syntax.identifier.class.system", &self.class_name_system),
            ("xcode.syntax.identifier.function.system", &self.function_name_system),
            ("xcode.syntax.identifier.constant.system", &self.constant_system),
            ("xcode.syntax.identifier.type.system", &self.type_name_system),
            ("xcode.syntax.identifier.variable.system", &self.instance_variable_system),
            ("xcode.syntax.identifier.macro.system", &self.preprocessor_macro_system),
        ]
    }

    fn from_dict(dict: &Dict) -> Result<Self, Error> {
        let mut colors = SyntaxColors::default();
        {
            let mut slots: [(&str, &mut Option<String>); 26] = [
                ("xcode.syntax.plain", &mut colors.text),
                ("xcode.syntax.comment", &mut colors.comment),
                ("xcode.syntax.comment.doc", &mut colors.documentation),
                ("xcode.syntax.comment.doc.keyword", &mut colors.documentation_keyword),
                ("xcode.syntax.mark", &mut colors.mark),
                ("xcode.syntax.string", &mut colors.string),
                ("xcode.syntax.character", &mut colors.character),
                ("xcode.syntax.number", &mut colors.number),
                ("xcode.syntax.keyword", &mut colors.keyword),
                ("xcode.syntax.preprocessor", &mut colors.preprocessor),
                ("xcode.syntax.url", &mut colors.url),
                ("xcode.syntax.attribute", &mut colors.attribute),
                ("xcode.syntax.declaration.type", &mut colors.declaration_type),
                ("xcode.syntax.declaration.other", &mut colors.declaration_other),
                ("xcode.syntax.identifier.class", &mut colors.class_name_project),
                ("xcode.syntax.identifier.function", &mut colors.function_name_project),
                ("xcode.syntax.identifier.constant", &mut colors.constant_project),
                ("xcode.syntax.identifier.type", &mut colors.type_name_project),
                ("xcode.syntax.identifier.variable", &mut colors.instance_variable_project),
                ("xcode.syntax.identifier.macro", &mut colors.preprocessor_macro_project),
                ("xcode.syntax.identifier.class.system", &mut colors.class_name_system),
                ("xcode.syntax.identifier.function.system", &mut colors.function_name_system),
                ("xcode.syntax.identifier.constant.system", &mut colors.constant_system),
                ("xcode.syntax.identifier.type.system", &mut colors.type_name_system),
                ("xcode.syntax.identifier.variable.system", &mut colors.instance_variable_system),
                ("xcode.syntax.identifier.macro.system", &mut colors.preprocessor_macro_system),
            ];
            for slot in &mut slots {
                if let Some(value) = string_value(dict, slot.0)? {
                    *slot.1 = Some(validated(slot.0, value)?);
                }
            }
        }
        Ok(colors)
    }
}

// ---------------------------------------------------------------------------
// Mapping from the palette
// ---------------------------------------------------------------------------

impl Theme for XcodeTheme {
    fn read(data: &[u8]) -> Result<Self, Error> {
        let text = std::str::from_utf8(data).map_err(|_| Error::InvalidInput)?;
        let dict = plist::parse(text)?;

        let background = string_value(&dict, KEY_BACKGROUND)?
            .ok_or_else(|| Error::Parse(format!("missing required key `{KEY_BACKGROUND}`")))?;
        let background = validated(KEY_BACKGROUND, background)?;

        let syntax_dict = dict
            .iter()
            .find(|(key, _)| key == KEY_SYNTAX_COLORS)
            .map(|(_, value)| match value {
                Value::Dict(d) => Ok(d),
                Value::String(_) => Err(Error::Parse(format!(
                    "key `{KEY_SYNTAX_COLORS}` must be a dict"
                ))),
            })
            .transpose()?
            .ok_or_else(|| Error::Parse(format!("missing required key `{KEY_SYNTAX_COLORS}`")))?;

        let optional = |key: &str| -> Result<Option<String>, Error> {
            string_value(&dict, key)?.map(|v| validated(key, v)).transpose()
        };

        Ok(XcodeTheme {
            content: Content {
                background,
                current_line_background: optional(KEY_CURRENT_LINE)?,
                selection: optional(KEY_SELECTION)?,
                cursor: optional(KEY_CURSOR)?,
                invisibles: optional(KEY_INVISIBLES)?,
                syntax_colors: SyntaxColors::from_dict(syntax_dict)?,
            },
        })
    }

    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let content = &self.content;
        let mut dict = Dict::new();
        dict.push((
            KEY_BACKGROUND.into(),
            Value::String(content.background.clone()),
        ));

        let optional = [
            (KEY_CURRENT_LINE, &content.current_line_background),
            (KEY_SELECTION, &content.selection),
            (KEY_CURSOR, &content.cursor),
            (KEY_INVISIBLES, &content.invisibles),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                dict.push((key.into(), Value::String(value.clone())));
            }
        }

        let mut syntax = Dict::new();
        for (key, value) in content.syntax_colors.pairs() {
            if let Some(value) = value {
                syntax.push((key.into(), Value::String(value.clone())));
            }
        }
        dict.push((KEY_SYNTAX_COLORS.into(), Value::Dict(syntax)));

        Ok(plist::to_xml(&dict).into_bytes())
    }

    /// Total mapping: every Xcode key either takes its palette counterpart
    /// or falls back to a documented substitute; a palette with only the
    /// mandatory roles still yields a complete document.
    fn from_palette(palette: &Palette) -> Result<Self, Error> {
        let background = palette.background.to_components();
        let text = palette.text.to_components();
        let encode = |color: Option<Color>| color.map(|c| c.to_components());

        Ok(XcodeTheme {
            content: Content {
                background: background.clone(),
                current_line_background: Some(
                    encode(palette.current_line_background).unwrap_or(background),
                ),
                selection: encode(palette.selection),
                cursor: encode(palette.cursor),
                invisibles: encode(palette.invisibles),
                syntax_colors: SyntaxColors {
                    text: Some(text.clone()),
                    comment: encode(palette.comment),
                    documentation: encode(palette.documentation),
                    documentation_keyword: encode(palette.documentation),
                    mark: encode(palette.documentation).or_else(|| encode(palette.comment)),
                    string: encode(palette.string),
                    character: encode(palette.character),
                    number: encode(palette.number),
                    keyword: encode(palette.keyword),
                    preprocessor: encode(palette.preprocessor),
                    url: encode(palette.documentation),
                    attribute: Some(text),
                    declaration_type: encode(palette.declaration_type),
                    declaration_other: encode(palette.declaration_other),
                    class_name_project: encode(palette.class_name_project),
                    function_name_project: encode(palette.function_name_project),
                    constant_project: encode(palette.constant_project),
                    type_name_project: encode(palette.type_name_project),
                    instance_variable_project: encode(palette.variable),
                    preprocessor_macro_project: encode(palette.preprocessor),
                    class_name_system: encode(palette.class_name_library),
                    function_name_system: encode(palette.function_name_library),
                    constant_system: encode(palette.constant_library),
                    type_name_system: encode(palette.type_name_library),
                    instance_variable_system: encode(palette.variable),
                    preprocessor_macro_system: encode(palette.preprocessor),
                },
            },
        })
    }

    /// The Xcode schema is strictly lower-fidelity than the palette, so
    /// reading canonical colors back out would silently drop information.
    fn palette(&self, _options: &ConvertOptions) -> Result<Palette, Error> {
        Err(Error::UnsupportedConversion(
            "Xcode themes cannot be converted back to canonical colors",
        ))
    }
}

fn string_value(dict: &Dict, key: &str) -> Result<Option<String>, Error> {
    match dict.iter().find(|(k, _)| k == key) {
        Some((_, Value::String(s))) => Ok(Some(s.clone())),
        Some((_, Value::Dict(_))) => {
            Err(Error::Parse(format!("key `{key}` must be a string")))
        }
        None => Ok(None),
    }
}

/// Check a component string parses before storing it, so decode failures
/// name the offending key.
fn validated(key: &str, value: String) -> Result<String, Error> {
    Color::from_components(&value)
        .map_err(|_| Error::Parse(format!("malformed color for key `{key}`: `{value}`")))?;
    Ok(value)
}
