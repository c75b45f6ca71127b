//! The schema-agnostic set of semantic color roles.

use crate::color::Color;

/// Canonical colors resolved from a source theme.
///
/// Every field except `background` and `text` is optional; those two always
/// carry a value because assembly falls back to theme-kind defaults.
/// Project roles color identifiers defined in the open project; library
/// roles color identifiers imported from frameworks ("system" on the Xcode
/// side).
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub current_line_background: Option<Color>,
    pub selection: Option<Color>,
    pub cursor: Option<Color>,
    pub invisibles: Option<Color>,

    pub text: Color,
    pub comment: Option<Color>,
    pub documentation: Option<Color>,
    pub string: Option<Color>,
    pub character: Option<Color>,
    pub number: Option<Color>,
    pub keyword: Option<Color>,
    pub variable: Option<Color>,

    pub preprocessor: Option<Color>,

    pub declaration_type: Option<Color>,
    pub declaration_other: Option<Color>,
    pub class_name_project: Option<Color>,
    pub function_name_project: Option<Color>,
    pub constant_project: Option<Color>,
    pub type_name_project: Option<Color>,
    pub class_name_library: Option<Color>,
    pub function_name_library: Option<Color>,
    pub constant_library: Option<Color>,
    pub type_name_library: Option<Color>,
}

impl Palette {
    /// A palette carrying only the mandatory roles, everything else absent.
    /// Used by tests and as a base for partial construction.
    pub fn minimal(background: Color, text: Color) -> Self {
        Self {
            background,
            current_line_background: None,
            selection: None,
            cursor: None,
            invisibles: None,
            text,
            comment: None,
            documentation: None,
            string: None,
            character: None,
            number: None,
            keyword: None,
            variable: None,
            preprocessor: None,
            declaration_type: None,
            declaration_other: None,
            class_name_project: None,
            function_name_project: None,
            constant_project: None,
            type_name_project: None,
            class_name_library: None,
            function_name_library: None,
            constant_library: None,
            type_name_library: None,
        }
    }
}
