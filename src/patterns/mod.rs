pub mod inclusion;

use regex::bytes::{Regex, RegexBuilder};

pub trait PatternMatcher {
    fn matches(&self, value: &str) -> bool;
}

/// A data-file pattern compiled once into an anchored regex.
///
/// Sources may be bare (`\d{3}`) or delimited the way the pattern tables store
/// them (`/^\d{3}$/`, trailing flags ignored). One leading `^` and one trailing
/// unescaped `$` are dropped and the remainder is wrapped as `^(?:...)$`, so an
/// alternation such as `^333|9(?:11|99)$` only ever matches whole strings.
///
/// Matching is byte-oriented with Unicode disabled, the way the tables were
/// authored: `\d` is `[0-9]` and a negated class consumes a single byte.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    body: String,
    regex: Regex,
}

impl Pattern {
    pub fn compile(source: &str) -> Result<Pattern, regex::Error> {
        let body = strip_anchors(strip_delimiters(source.trim())).to_string();
        let regex = RegexBuilder::new(&format!("^(?:{})$", body))
            .unicode(false)
            .build()?;

        Ok(Pattern {
            source: source.to_string(),
            body,
            regex,
        })
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value.as_bytes())
    }

    /// The pattern as written in the table.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The unanchored expression the regex was built from.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The anchored expression actually matched against.
    pub fn anchored(&self) -> &str {
        self.regex.as_str()
    }
}

impl PatternMatcher for Pattern {
    fn matches(&self, value: &str) -> bool {
        self.is_match(value)
    }
}

fn strip_delimiters(source: &str) -> &str {
    if let Some(rest) = source.strip_prefix('/') {
        if let Some(end) = rest.rfind('/') {
            let flags = &rest[end + 1..];
            if flags.chars().all(|c| c.is_ascii_alphabetic()) {
                return &rest[..end];
            }
        }
    }
    source
}

fn strip_anchors(body: &str) -> &str {
    let body = body.strip_prefix('^').unwrap_or(body);

    match body.strip_suffix('$') {
        // `\$` is a literal dollar, `\\$` is an escaped backslash and an anchor
        Some(rest) if rest.chars().rev().take_while(|&c| c == '\\').count() % 2 == 0 => rest,
        _ => body,
    }
}
