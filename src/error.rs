//! Unified error types for the converter.

use std::fmt;

// ---------------------------------------------------------------------------
// Error — engine-level
// ---------------------------------------------------------------------------

/// Errors from decoding, converting, or encoding a theme.
#[derive(Debug)]
pub enum Error {
    /// The input bytes were not usable UTF-8 text.
    InvalidInput,
    /// Structural decode failure; carries the underlying diagnostic.
    Parse(String),
    /// A malformed theme reference (URL that cannot be parsed).
    InvalidUrl(String),
    /// The requested conversion direction is not supported.
    UnsupportedConversion(&'static str),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "input is not valid UTF-8 text"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::InvalidUrl(url) => write!(f, "invalid URL: {url}"),
            Self::UnsupportedConversion(msg) => write!(f, "unsupported conversion: {msg}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// FetchError — network layer
// ---------------------------------------------------------------------------

/// Errors from fetching remote themes or marketplace packages.
#[derive(Debug)]
pub enum FetchError {
    /// Network / reqwest-level error.
    Http(reqwest::Error),
    /// Non-2xx status from the server.
    Status(u16),
    /// The downloaded package archive could not be extracted.
    Archive(zip::result::ZipError),
    /// The response did not contain what we were looking for.
    MissingAsset(String),
    Io(std::io::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status(code) => write!(f, "unexpected status {code}"),
            Self::Archive(e) => write!(f, "archive: {e}"),
            Self::MissingAsset(what) => write!(f, "missing asset: {what}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<zip::result::ZipError> for FetchError {
    fn from(e: zip::result::ZipError) -> Self {
        Self::Archive(e)
    }
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}
