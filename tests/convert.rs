//! End-to-end conversion tests: VS Code JSON in, Xcode plist out.

use themeport::color::Color;
use themeport::error::Error;
use themeport::theme::{ConvertOptions, Theme, VsCodeTheme, XcodeTheme};

fn convert(input: &[u8]) -> XcodeTheme {
    let vscode = VsCodeTheme::read(input).expect("read source theme");
    let palette = vscode
        .palette(&ConvertOptions::default())
        .expect("resolve palette");
    XcodeTheme::from_palette(&palette).expect("map to target")
}

#[test]
fn dark_theme_end_to_end() {
    let input = br##"{
        "type": "dark",
        "colors": { "editor.background": "#112233" },
        "tokenColors": [
            { "scope": "comment", "settings": { "foreground": "#556677" } }
        ]
    }"##;

    let vscode = VsCodeTheme::read(input).unwrap();
    let palette = vscode.palette(&ConvertOptions::default()).unwrap();
    assert_eq!(palette.background, Color::from_hex("#112233").unwrap());
    assert_eq!(palette.comment, Color::from_hex("#556677"));
    assert_eq!(palette.text, Color::WHITE);

    let xcode = XcodeTheme::from_palette(&palette).unwrap();
    let background = Color::from_components(&xcode.content.background).unwrap();
    assert!((background.r - 0.0667).abs() < 1e-3);
    assert!((background.g - 0.1333).abs() < 1e-3);
    assert!((background.b - 0.2).abs() < 1e-9);
    assert_eq!(background.a, 1.0);

    let comment = xcode.content.syntax_colors.comment.as_deref().unwrap();
    assert_eq!(
        Color::from_components(comment).unwrap(),
        Color::from_hex("#556677").unwrap()
    );

    let text = String::from_utf8(xcode.to_bytes().unwrap()).unwrap();
    assert!(text.starts_with("<?xml version=\"1.0\""));
    assert!(text.contains("<key>DVTSourceTextBackground</key>"));
    assert!(text.contains("<key>DVTSourceTextSyntaxColors</key>"));
    assert!(text.contains("<key>xcode.syntax.comment</key>"));
}

#[test]
fn commented_source_converts_like_clean_source() {
    let clean = br##"{
        "type": "dark",
        "colors": { "editor.background": "#112233" },
        "tokenColors": [
            { "scope": "comment", "settings": { "foreground": "#556677" } }
        ]
    }"##;
    let commented = br##"{
        // editor chrome
        "type": "dark",
        "colors": { "editor.background": "#112233" }, /* workbench */
        "tokenColors": [
            { "scope": "comment", "settings": { "foreground": "#556677" } }
        ],
    }"##;

    assert_eq!(convert(clean), convert(commented));
}

#[test]
fn comment_markers_inside_strings_are_preserved() {
    let input = br##"{
        "name": "Weird // Name",
        "type": "dark",
        "colors": {},
        "tokenColors": []
    }"##;
    let vscode = VsCodeTheme::read(input).unwrap();
    assert_eq!(vscode.content.name.as_deref(), Some("Weird // Name"));
}

#[test]
fn minimal_theme_produces_complete_target_document() {
    let xcode = convert(br##"{"type": "light", "colors": {}, "tokenColors": []}"##);

    // Light defaults: white background, black text, black cursor.
    assert_eq!(xcode.content.background, "1.0 1.0 1.0 1.0");
    assert_eq!(
        xcode.content.current_line_background.as_deref(),
        Some("1.0 1.0 1.0 1.0")
    );
    assert_eq!(xcode.content.cursor.as_deref(), Some("0.0 0.0 0.0 1.0"));
    assert_eq!(
        xcode.content.syntax_colors.text.as_deref(),
        Some("0.0 0.0 0.0 1.0")
    );
    assert_eq!(
        xcode.content.syntax_colors.attribute.as_deref(),
        Some("0.0 0.0 0.0 1.0")
    );

    // The document encodes fully and reads back identically.
    let bytes = xcode.to_bytes().unwrap();
    assert_eq!(XcodeTheme::read(&bytes).unwrap(), xcode);
}

#[test]
fn converted_document_cannot_be_converted_back() {
    let xcode = convert(br##"{"type": "dark", "colors": {}, "tokenColors": []}"##);
    let bytes = xcode.to_bytes().unwrap();
    let reread = XcodeTheme::read(&bytes).unwrap();
    assert!(matches!(
        reread.palette(&ConvertOptions::default()),
        Err(Error::UnsupportedConversion(_))
    ));
}

#[test]
fn conversion_reads_from_disk_and_writes_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("sample.json");
    std::fs::write(
        &source,
        br##"{
            "name": "Sample",
            "type": "dark",
            "colors": { "editor.background": "#112233" },
            "tokenColors": []
        }"##,
    )
    .unwrap();

    let data = std::fs::read(&source).unwrap();
    let xcode = convert(&data);
    let target = dir.path().join("(t)Sample.xccolortheme");
    std::fs::write(&target, xcode.to_bytes().unwrap()).unwrap();

    assert_eq!(XcodeTheme::read(&std::fs::read(&target).unwrap()).unwrap(), xcode);
}
