//! CLI argument parsing via clap.

use clap::Parser;

/// Convert VS Code theme files into Xcode theme files.
#[derive(Debug, Parser)]
#[command(name = "themeport", version)]
pub struct Args {
    /// Path or URL of the VS Code theme file (.json). GitHub and
    /// VS Marketplace links are also supported.
    pub theme: String,

    /// Output directory (default: the Xcode user themes directory).
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,

    /// Path to config file (default: ./themeport.toml or
    /// ~/.config/themeport/themeport.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Skip the color profile correction of VS Code theme values.
    /// Converted colors will look different in Xcode from how they
    /// appear in VS Code.
    #[arg(short = 's', long = "skip-color-profile-correction")]
    pub skip_color_profile_correction: bool,

    /// Enable debug logging.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
