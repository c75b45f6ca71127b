//! Tolerant JSON decoding.
//!
//! VS Code theme files are JSON in name only: the ecosystem ships them with
//! line comments, block comments, and trailing commas. Decoding runs in two
//! stages. First, three regex passes strip the comment shapes that can be
//! removed safely without parsing, and the result is decoded strictly. If
//! that fails with a syntax-class error, a string-aware scan of the
//! *original* text removes comments and trailing commas the regexes cannot
//! see (comments adjacent to values, `//` sequences inside string literals).
//! When the rescue also fails, the original strict-decode diagnostic is the
//! one reported.

use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::Error;

/// Decode a theme document from possibly comment-bearing JSON text.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, Error> {
    let sanitized = strip_comments_regex(text);

    match serde_json::from_str(&sanitized) {
        Ok(value) => Ok(value),
        Err(original) => {
            if !matches!(original.classify(), Category::Syntax | Category::Eof) {
                // Type mismatches and I/O problems are not comment damage;
                // the rescue scan cannot fix them.
                return Err(Error::Parse(original.to_string()));
            }

            tracing::debug!("strict decode failed ({original}); retrying with tolerant scan");
            let rescanned = strip_trailing_commas(&strip_comments_scan(text));
            match serde_json::from_str(&rescanned) {
                Ok(value) => Ok(value),
                Err(_) => Err(Error::Parse(original.to_string())),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Stage 1: regex passes
// ---------------------------------------------------------------------------

/// Lines that are nothing but a `//` comment.
fn line_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*//.*").expect("valid regex"))
}

/// Trailing `//` comments after a closing quote-plus-delimiter. Requiring
/// `"` followed by one of `] } [ { ,` keeps URLs and other in-string `//`
/// sequences intact.
fn end_of_line_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?m)^(.*[^\\]"[\[\]{},])\s*//.*"#).expect("valid regex"))
}

/// `/* ... */` block comments, non-greedy, spanning lines.
fn block_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"))
}

fn strip_comments_regex(text: &str) -> String {
    let pass1 = line_comment_re().replace_all(text, "");
    let pass2 = end_of_line_comment_re().replace_all(&pass1, "$1");
    block_comment_re().replace_all(&pass2, "").into_owned()
}

// ---------------------------------------------------------------------------
// Stage 2: string-aware rescue scan
// ---------------------------------------------------------------------------

/// Remove `//` and `/* */` comments, tracking string literals so their
/// contents are never touched.
fn strip_comments_scan(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                // Line comment: drop to end of line, keep the newline.
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Remove a dangling comma immediately before `}` or `]`. Input must
/// already be comment-free.
fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if c == '"' {
            in_string = true;
        } else if c == '}' || c == ']' {
            let trimmed = out.trim_end().len();
            if out[..trimmed].ends_with(',') {
                out.truncate(trimmed - 1);
            }
        }
        out.push(c);
    }

    out
}
