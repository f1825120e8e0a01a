//! The textual delimiter shared by the merger and the splitter.
//!
//! A marker line has the shape
//! `// Inserted file <quoted-name> encoding='<encoding>'` and sits on its
//! own line between segments. The newline the merger emits ahead of each
//! marker belongs to the delimiter, not to the previous segment, which is
//! what makes merge and split exact inverses of each other.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Declared encoding written into every emitted marker.
pub const DECLARED_ENCODING: &str = "utf-8";

/// Output name for bundle content that precedes the first marker.
pub const DEFAULT_SEGMENT_NAME: &str = "setup.js";

/// Start of a candidate marker line. Whether the line is a real marker
/// depends on the filename that follows.
static MARKER_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^//[ \t]*Inserted file[ \t]+").unwrap());

/// Rest of a marker line: an optionally quoted `name.ext` token plus an
/// optional `encoding='...'` clause. Anchored to the whole line, so
/// trailing junk disqualifies the candidate.
static MARKER_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^["']?(\w+\.\w+)["']?[ \t]*(?:encoding[ \t]*=[ \t]*["']([^"']*)["'])?[ \t]*$"#)
        .unwrap()
});

/// Optional `"use strict";` directive plus the opening of a self-invoking
/// function, at the very start of a bundle.
static WRAPPER_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:["']use strict["'];)?\s*\(function\s?\([^)\n]*\)\s*\{"#).unwrap()
});

/// Closing `})(<args>);` of the self-invoking function, anchored at the end
/// of the text. Consumes the newline the merger emits ahead of it.
static WRAPPER_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n?\}\)\([^)\n]*\);\s*\z").unwrap());

/// A recognized marker and the spans needed to cut segments around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// First byte of the delimiter, including one preceding newline when
    /// present.
    pub span_start: usize,
    /// First content byte after the marker line and its newline.
    pub content_start: usize,
    /// Bare `name.ext` token recorded by the marker.
    pub filename: String,
    /// Declared encoding, if the marker carried one.
    pub encoding: Option<String>,
}

/// Scan `text` for marker lines in a single pass.
///
/// A `// Inserted file` line only counts when the rest of the line is a
/// well-formed filename matching `\w+\.\w+` (optionally quoted) plus an
/// optional encoding clause; anything else stays plain content.
pub fn find_markers(text: &str) -> Vec<Marker> {
    let mut markers = Vec::new();
    for head in MARKER_HEAD.find_iter(text) {
        let rest = &text[head.end()..];
        let line_end = rest.find('\n').unwrap_or(rest.len());
        let Some(caps) = MARKER_TAIL.captures(&rest[..line_end]) else {
            log::debug!("ignoring marker-like line without a valid filename");
            continue;
        };
        let span_start = if text[..head.start()].ends_with('\n') {
            head.start() - 1
        } else {
            head.start()
        };
        let content_start = (head.end() + line_end + 1).min(text.len());
        markers.push(Marker {
            span_start,
            content_start,
            filename: caps[1].to_string(),
            encoding: caps.get(2).map(|m| m.as_str().to_string()),
        });
    }
    markers
}

/// Strip the wrapper opening from the start of `text`, returning the
/// remainder when it matched.
pub fn strip_wrapper_open(text: &str) -> Option<&str> {
    WRAPPER_OPEN.find(text).map(|m| &text[m.end()..])
}

/// Strip the wrapper closing from the end of `text`, returning the
/// remainder when it matched.
pub fn strip_wrapper_close(text: &str) -> Option<&str> {
    WRAPPER_CLOSE.find(text).map(|m| &text[..m.start()])
}

/// Quote a filename so it stays a single shell token, following POSIX
/// single-quote rules. Names made only of safe characters pass through
/// bare.
pub fn shell_quote(name: &str) -> Cow<'_, str> {
    fn is_safe(c: char) -> bool {
        c.is_ascii_alphanumeric()
            || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
    }
    if !name.is_empty() && name.chars().all(is_safe) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("'{}'", name.replace('\'', r#"'"'"'"#)))
    }
}
