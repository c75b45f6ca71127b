//! VS Marketplace package retrieval.
//!
//! Marketplace item pages don't link theme JSON directly; the gallery API
//! has to be asked for the extension's VSIX package, which is a zip archive
//! containing `extension/themes/*.json`. Everything here is boundary I/O;
//! the conversion engine only ever sees the extracted files' bytes.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tempfile::TempDir;
use url::Url;

use crate::error::FetchError;
use crate::fetch;

const MARKETPLACE_HOST: &str = "marketplace.visualstudio.com";
const GALLERY_QUERY_URL: &str =
    "https://marketplace.visualstudio.com/_apis/public/gallery/extensionquery";
const GALLERY_ACCEPT: &str = "application/json;api-version=6.1-preview.1;excludeUrls=true";
const VSIX_ASSET_TYPE: &str = "Microsoft.VisualStudio.Services.VSIXPackage";

/// `filterType` 7 is "extension name"; flags 103 includes version files.
fn gallery_query(item_name: &str) -> serde_json::Value {
    serde_json::json!({
        "assetTypes": [VSIX_ASSET_TYPE],
        "filters": [{
            "criteria": [{ "filterType": 7, "value": item_name }],
            "direction": 2,
            "pageSize": 100,
            "pageNumber": 1,
            "sortBy": 0,
            "sortOrder": 0,
            "pagingToken": null
        }],
        "flags": 103
    })
}

// ---------------------------------------------------------------------------
// Gallery response model
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct QueryResponse {
    results: Vec<QueryResult>,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    extensions: Vec<Extension>,
}

#[derive(Debug, Deserialize)]
struct Extension {
    versions: Vec<Version>,
}

#[derive(Debug, Deserialize)]
struct Version {
    files: Vec<AssetFile>,
}

#[derive(Debug, Deserialize)]
struct AssetFile {
    #[serde(rename = "assetType")]
    asset_type: String,
    source: String,
}

/// The VSIX download URL of the latest version in a gallery response.
fn vsix_url(response: &QueryResponse) -> Option<&str> {
    response
        .results
        .first()?
        .extensions
        .first()?
        .versions
        .first()?
        .files
        .iter()
        .find(|file| file.asset_type == VSIX_ASSET_TYPE)
        .map(|file| file.source.as_str())
}

// ---------------------------------------------------------------------------
// Public surface
// ---------------------------------------------------------------------------

/// Extract the `itemName` from a marketplace item URL, if it is one.
pub fn parse_marketplace_url(reference: &str) -> Option<String> {
    let url = Url::parse(reference).ok()?;
    if url.host_str() != Some(MARKETPLACE_HOST) || url.path() != "/items" {
        return None;
    }
    url.query_pairs()
        .find(|(key, _)| key == "itemName")
        .map(|(_, value)| value.into_owned())
}

/// A downloaded, extracted extension package. The temp directory lives as
/// long as this value; the theme paths point into it.
pub struct ExtensionPackage {
    _dir: TempDir,
    pub themes: Vec<PathBuf>,
}

/// Download an extension's VSIX and return the theme JSON files inside it.
pub async fn download_themes(
    item_name: &str,
    timeout: Duration,
) -> Result<ExtensionPackage, FetchError> {
    let download_url = package_download_url(item_name, timeout).await?;
    tracing::debug!("downloading package {download_url}");

    let url = Url::parse(&download_url)
        .map_err(|_| FetchError::MissingAsset(format!("unusable download URL `{download_url}`")))?;
    let package = fetch::fetch_bytes(&url, timeout).await?;

    let dir = TempDir::new()?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(package))?;
    archive.extract(dir.path())?;

    let themes_dir = dir.path().join("extension").join("themes");
    let mut themes = Vec::new();
    if themes_dir.is_dir() {
        for entry in std::fs::read_dir(&themes_dir)? {
            let path = entry?.path();
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_json {
                themes.push(path);
            }
        }
        themes.sort();
    }

    Ok(ExtensionPackage { _dir: dir, themes })
}

/// Ask the gallery API for the extension's VSIX package URL.
async fn package_download_url(item_name: &str, timeout: Duration) -> Result<String, FetchError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response = client
        .post(GALLERY_QUERY_URL)
        .header("Content-Type", "application/json")
        .header("Accept", GALLERY_ACCEPT)
        .json(&gallery_query(item_name))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let parsed: QueryResponse = response.json().await?;
    vsix_url(&parsed)
        .map(str::to_owned)
        .ok_or_else(|| FetchError::MissingAsset(format!("no VSIX package for `{item_name}`")))
}
