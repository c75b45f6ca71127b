//! Path and URL helpers for the CLI boundary.

use std::path::{Path, PathBuf};

use url::Url;

use crate::error::Error;

/// True when the reference is an `http(s)` URL rather than a local path.
pub fn is_network_url(reference: &str) -> bool {
    match Url::parse(reference) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Parse a remote reference after rewriting, failing with `InvalidUrl`.
pub fn parse_remote_url(reference: &str) -> Result<Url, Error> {
    let expanded = expand_remote_url(reference);
    Url::parse(&expanded).map_err(|_| Error::InvalidUrl(reference.to_string()))
}

/// Rewrite GitHub web links to their raw-content equivalent so the theme
/// JSON itself is fetched instead of the HTML page around it.
pub fn expand_remote_url(reference: &str) -> String {
    let Ok(url) = Url::parse(reference) else {
        return reference.to_string();
    };
    if url.host_str() != Some("github.com") {
        return reference.to_string();
    }

    reference
        .replacen("//github.com/", "//raw.githubusercontent.com/", 1)
        .replacen("/blob/", "/", 1)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// The last path component of a path or URL, without its extension. Used as
/// the theme name when the document does not declare one.
pub fn file_stem(reference: &str) -> String {
    Path::new(reference.trim_end_matches('/'))
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| reference.to_string())
}
