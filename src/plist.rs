//! Minimal XML property-list codec.
//!
//! `.xccolortheme` files are XML plists whose values are only strings and
//! dicts, so this codec handles exactly that subset. Key order is
//! significant to us for stable output, so dicts are ordered pairs rather
//! than maps.

use crate::error::Error;

/// A plist value: a string leaf or a nested dict.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Dict(Dict),
}

/// An ordered list of key/value pairs.
pub type Dict = Vec<(String, Value)>;

const HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n\
<plist version=\"1.0\">\n";

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Serialize a root dict as an XML plist document.
pub fn to_xml(root: &Dict) -> String {
    let mut out = String::from(HEADER);
    write_dict(&mut out, root, 0);
    out.push_str("</plist>\n");
    out
}

fn write_dict(out: &mut String, dict: &Dict, depth: usize) {
    let indent = "\t".repeat(depth);
    out.push_str(&indent);
    out.push_str("<dict>\n");
    for (key, value) in dict {
        out.push_str(&indent);
        out.push_str("\t<key>");
        out.push_str(&escape(key));
        out.push_str("</key>\n");
        match value {
            Value::String(s) => {
                out.push_str(&indent);
                out.push_str("\t<string>");
                out.push_str(&escape(s));
                out.push_str("</string>\n");
            }
            Value::Dict(d) => write_dict(out, d, depth + 1),
        }
    }
    out.push_str(&indent);
    out.push_str("</dict>\n");
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Parse an XML plist document into its root dict.
pub fn parse(text: &str) -> Result<Dict, Error> {
    let mut cursor = Cursor { text, pos: 0 };
    cursor.skip_prolog();
    cursor.expect("<plist")?;
    cursor.skip_past('>')?;
    cursor.skip_ws();
    let root = parse_dict(&mut cursor)?;
    cursor.skip_ws();
    cursor.expect("</plist>")?;
    Ok(root)
}

fn parse_dict(cursor: &mut Cursor<'_>) -> Result<Dict, Error> {
    cursor.expect("<dict>")?;
    let mut dict = Dict::new();
    loop {
        cursor.skip_ws();
        if cursor.eat("</dict>") {
            return Ok(dict);
        }
        cursor.expect("<key>")?;
        let key = unescape(cursor.text_until_tag()?);
        cursor.expect("</key>")?;
        cursor.skip_ws();

        let value = if cursor.eat("<string>") {
            let s = unescape(cursor.text_until_tag()?);
            cursor.expect("</string>")?;
            Value::String(s)
        } else if cursor.eat("<string/>") {
            Value::String(String::new())
        } else if cursor.remainder().starts_with("<dict>") {
            Value::Dict(parse_dict(cursor)?)
        } else {
            return Err(Error::Parse(format!(
                "unsupported plist value for key `{key}`"
            )));
        };
        dict.push((key, value));
    }
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn remainder(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn skip_ws(&mut self) {
        let rest = self.remainder();
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }

    /// Skip the XML declaration and DOCTYPE before the root element.
    fn skip_prolog(&mut self) {
        loop {
            self.skip_ws();
            let rest = self.remainder();
            if rest.starts_with("<?") || rest.starts_with("<!") {
                match rest.find('>') {
                    Some(end) => self.pos += end + 1,
                    None => return,
                }
            } else {
                return;
            }
        }
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.remainder().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), Error> {
        if self.eat(token) {
            Ok(())
        } else {
            let found: String = self.remainder().chars().take(24).collect();
            Err(Error::Parse(format!("expected `{token}`, found `{found}`")))
        }
    }

    fn skip_past(&mut self, stop: char) -> Result<(), Error> {
        match self.remainder().find(stop) {
            Some(at) => {
                self.pos += at + stop.len_utf8();
                Ok(())
            }
            None => Err(Error::Parse(format!("expected `{stop}`"))),
        }
    }

    /// Consume text up to the next `<`.
    fn text_until_tag(&mut self) -> Result<&'a str, Error> {
        let rest = self.remainder();
        match rest.find('<') {
            Some(at) => {
                self.pos += at;
                Ok(&rest[..at])
            }
            None => Err(Error::Parse("unterminated text content".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dict {
        vec![
            ("Background".into(), Value::String("0.1 0.2 0.3 1.0".into())),
            (
                "SyntaxColors".into(),
                Value::Dict(vec![
                    ("comment".into(), Value::String("0.5 0.5 0.5 1.0".into())),
                    ("empty".into(), Value::String(String::new())),
                ]),
            ),
        ]
    }

    #[test]
    fn round_trips_nested_dicts() {
        let dict = sample();
        assert_eq!(parse(&to_xml(&dict)).unwrap(), dict);
    }

    #[test]
    fn emits_plist_header() {
        let xml = to_xml(&sample());
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<!DOCTYPE plist"));
        assert!(xml.ends_with("</plist>\n"));
    }

    #[test]
    fn escapes_special_characters() {
        let dict: Dict = vec![("a&b".into(), Value::String("x < y".into()))];
        let xml = to_xml(&dict);
        assert!(xml.contains("a&amp;b"));
        assert!(xml.contains("x &lt; y"));
        assert_eq!(parse(&xml).unwrap(), dict);
    }

    #[test]
    fn parses_self_closing_empty_string() {
        let xml = "<plist version=\"1.0\"><dict><key>k</key><string/></dict></plist>";
        assert_eq!(
            parse(xml).unwrap(),
            vec![("k".into(), Value::String(String::new()))]
        );
    }

    #[test]
    fn rejects_unsupported_value_kind() {
        let xml = "<plist><dict><key>k</key><integer>3</integer></dict></plist>";
        let err = parse(xml).unwrap_err();
        assert!(err.to_string().contains("unsupported plist value"));
    }

    #[test]
    fn rejects_truncated_document() {
        let xml = "<plist><dict><key>k</key><string>v</string>";
        assert!(parse(xml).is_err());
    }
}
