//! CLI entry point for themeport.

mod cli;

use std::path::Path;
use std::time::Duration;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use themeport::config::{load_config, Config};
use themeport::error::Error;
use themeport::theme::{ConvertOptions, Theme, VsCodeTheme, XcodeTheme};
use themeport::{fetch, marketplace, urlutil};

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    init_tracing(args.verbose);

    let mut config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    // Apply CLI overrides.
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if args.skip_color_profile_correction {
        config.skip_color_profile_correction = true;
    }

    if let Err(message) = run(&args.theme, &config).await {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "themeport=debug"
    } else {
        "themeport=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(reference: &str, config: &Config) -> Result<(), String> {
    let options = ConvertOptions {
        skip_color_profile_correction: config.skip_color_profile_correction,
    };
    let timeout = Duration::from_secs(config.fetch_timeout_secs);
    let output_dir = urlutil::expand_tilde(&config.output_dir);
    std::fs::create_dir_all(&output_dir)
        .map_err(|e| format!("cannot create output directory {}: {e}", output_dir.display()))?;

    if let Some(item_name) = marketplace::parse_marketplace_url(reference) {
        debug!("marketplace item {item_name}");
        let package = marketplace::download_themes(&item_name, timeout)
            .await
            .map_err(|e| e.to_string())?;
        if package.themes.is_empty() {
            return Err(format!("extension `{item_name}` contains no theme files"));
        }

        // Convert every theme in the package; one bad file doesn't abort
        // the rest.
        let mut converted = 0usize;
        for path in &package.themes {
            let result = std::fs::read(path).map_err(Error::from).and_then(|data| {
                convert_theme(&data, &path.to_string_lossy(), &output_dir, &options)
            });
            match result {
                Ok(name) => {
                    println!("Saved as \"{name}\"");
                    converted += 1;
                }
                Err(e) => eprintln!("error: {}: {e}", path.display()),
            }
        }
        if converted == 0 {
            return Err("no theme in the package could be converted".into());
        }
        Ok(())
    } else {
        let data = load_theme_bytes(reference, timeout).await?;
        let name =
            convert_theme(&data, reference, &output_dir, &options).map_err(|e| e.to_string())?;
        println!("Saved as \"{name}\"");
        Ok(())
    }
}

async fn load_theme_bytes(reference: &str, timeout: Duration) -> Result<Vec<u8>, String> {
    if urlutil::is_network_url(reference) {
        let url = urlutil::parse_remote_url(reference).map_err(|e| e.to_string())?;
        fetch::fetch_bytes(&url, timeout).await.map_err(|e| e.to_string())
    } else {
        let path = urlutil::expand_tilde(reference);
        std::fs::read(&path).map_err(|e| format!("{}: {e}", path.display()))
    }
}

/// Convert one theme document and write it into the output directory.
/// Returns the saved theme's display name.
fn convert_theme(
    data: &[u8],
    reference: &str,
    output_dir: &Path,
    options: &ConvertOptions,
) -> Result<String, Error> {
    let vscode = VsCodeTheme::read(data)?;
    let palette = vscode.palette(options)?;
    debug!(
        "resolved background {} text {}",
        palette.background.to_hex(),
        palette.text.to_hex()
    );
    let xcode = XcodeTheme::from_palette(&palette)?;

    let name = vscode
        .content
        .name
        .clone()
        .unwrap_or_else(|| urlutil::file_stem(reference));
    let output_name = format!("(t){name}");
    let output_path = output_dir.join(format!("{output_name}.xccolortheme"));
    debug!("writing {}", output_path.display());
    std::fs::write(&output_path, xcode.to_bytes()?)?;
    Ok(output_name)
}
