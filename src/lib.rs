//! themeport — convert VS Code color themes into Xcode color themes.
//!
//! The engine is a pipeline of pure steps: tolerant JSON decode of the
//! scope-based VS Code schema, ordered fallback resolution of every
//! semantic color role into a canonical [`theme::Palette`], and a total
//! mapping from the palette into the fixed-key Xcode plist schema. The CLI,
//! remote fetching, and marketplace download live at the boundary and only
//! ever hand the engine bytes.
//!
//! # Quick start
//!
//! ```no_run
//! use themeport::theme::{ConvertOptions, Theme, VsCodeTheme, XcodeTheme};
//!
//! # fn example() -> Result<(), themeport::error::Error> {
//! let data = std::fs::read("one-dark.json")?;
//! let vscode = VsCodeTheme::read(&data)?;
//! let palette = vscode.palette(&ConvertOptions::default())?;
//! let xcode = XcodeTheme::from_palette(&palette)?;
//! std::fs::write("(t)One Dark.xccolortheme", xcode.to_bytes()?)?;
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod fetch;
pub mod lenient;
pub mod marketplace;
pub mod plist;
pub mod theme;
pub mod urlutil;
