//! Theme schemas and the conversion contract between them.
//!
//! Exactly two schemas exist: the scope-based VS Code format (source) and
//! the fixed-key Xcode format (target). Both implement [`Theme`], and
//! conversion flows through the canonical [`Palette`]:
//!
//! bytes → source theme → palette → target theme → bytes

pub mod palette;
pub mod vscode;
pub mod xcode;

pub use palette::Palette;
pub use vscode::VsCodeTheme;
pub use xcode::XcodeTheme;

use crate::error::Error;

/// Options threaded through a single conversion. No global state; every
/// call that needs a knob receives it explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    /// Copy color components verbatim instead of re-interpreting them under
    /// the display profile. Converted themes will then look different from
    /// how VS Code renders them.
    pub skip_color_profile_correction: bool,
}

/// The facade both schema models implement.
pub trait Theme: Sized {
    /// Decode a theme from raw bytes.
    fn read(data: &[u8]) -> Result<Self, Error>;

    /// Encode the theme back to bytes. Succeeds fully or not at all.
    fn to_bytes(&self) -> Result<Vec<u8>, Error>;

    /// Build a theme of this schema from canonical colors.
    fn from_palette(palette: &Palette) -> Result<Self, Error>;

    /// Resolve this theme's canonical colors.
    fn palette(&self, options: &ConvertOptions) -> Result<Palette, Error>;
}
