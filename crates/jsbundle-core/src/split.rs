use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SplitError;
use crate::marker::{self, DEFAULT_SEGMENT_NAME};

/// One reconstructed source file from a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Bare `name.ext` output filename.
    pub filename: String,
    /// Declared encoding from the marker; `None` means UTF-8.
    pub encoding: Option<String>,
    pub content: String,
}

/// Cut a bundle into segments.
///
/// A wrapping function scope at the start of the text is stripped before
/// markers are scanned; when one was present, the matching `})(...);` is
/// stripped from the final segment, or kept as-is when it cannot be found.
/// Content ahead of the first marker becomes a segment named `setup.js`
/// unless it is only the wrapper/marker spacing.
pub fn split_bundle(text: &str) -> Vec<Segment> {
    let (body, wrapped) = match marker::strip_wrapper_open(text) {
        Some(rest) => (rest, true),
        None => (text, false),
    };
    if wrapped {
        log::debug!("bundle carries a wrapping function scope");
    }

    let markers = marker::find_markers(body);
    let mut segments = Vec::with_capacity(markers.len() + 1);

    let leading_end = markers.first().map_or(body.len(), |m| m.span_start);
    segments.push(Segment {
        filename: DEFAULT_SEGMENT_NAME.to_string(),
        encoding: None,
        content: body[..leading_end].to_string(),
    });

    for (i, m) in markers.iter().enumerate() {
        // Adjacent marker lines share one newline: the next marker's span
        // may claim the byte this marker's content starts past.
        let end = markers
            .get(i + 1)
            .map_or(body.len(), |next| next.span_start.max(m.content_start));
        segments.push(Segment {
            filename: m.filename.clone(),
            encoding: m.encoding.clone(),
            content: body[m.content_start..end].to_string(),
        });
    }

    if wrapped {
        if let Some(last) = segments.last_mut() {
            if let Some(stripped) = marker::strip_wrapper_close(&last.content) {
                let stripped_len = stripped.len();
                last.content.truncate(stripped_len);
            } else {
                log::warn!("wrapping scope is never closed; keeping trailing content as-is");
            }
        }
    }

    if segments
        .first()
        .is_some_and(|lead| lead.content.trim().is_empty())
    {
        segments.remove(0);
    }

    segments
}

/// Write one segment into `out_dir`, refusing to overwrite an existing
/// file.
pub fn write_segment(segment: &Segment, out_dir: &Path) -> Result<PathBuf, SplitError> {
    let path = out_dir.join(&segment.filename);
    if path.exists() {
        return Err(SplitError::OutputExists { path });
    }
    fs::write(&path, &segment.content).map_err(|source| SplitError::WriteFailed {
        path: path.clone(),
        source,
    })?;
    log::debug!("wrote {} ({} bytes)", path.display(), segment.content.len());
    Ok(path)
}

/// Write all segments in bundle order. Stops at the first conflict or I/O
/// failure; files already written stay on disk.
pub fn write_segments(segments: &[Segment], out_dir: &Path) -> Result<Vec<PathBuf>, SplitError> {
    let mut written = Vec::with_capacity(segments.len());
    for segment in segments {
        written.push(write_segment(segment, out_dir)?);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = "\n// Inserted file a.js encoding='utf-8'\nvar a = 1;\n// Inserted file b.js encoding='utf-8'\nvar b = 2;\n";

    #[test]
    fn splits_a_plain_bundle_into_its_files() {
        let segments = split_bundle(PLAIN);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].filename, "a.js");
        assert_eq!(segments[0].content, "var a = 1;");
        assert_eq!(segments[1].filename, "b.js");
        assert_eq!(segments[1].content, "var b = 2;\n");
    }

    #[test]
    fn leading_content_becomes_setup_js() {
        let segments =
            split_bundle("var boot = true;\n// Inserted file a.js encoding='utf-8'\nvar a;");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].filename, "setup.js");
        assert_eq!(segments[0].content, "var boot = true;");
        assert_eq!(segments[1].filename, "a.js");
        assert_eq!(segments[1].content, "var a;");
    }

    #[test]
    fn wrapper_spacing_is_not_written_as_setup_js() {
        let wrapped = format!("\"use strict\";\n(function()\n{{{PLAIN}\n}})();\n");
        let segments = split_bundle(&wrapped);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].filename, "a.js");
        assert_eq!(segments[0].content, "var a = 1;");
        assert_eq!(segments[1].content, "var b = 2;\n");
    }

    #[test]
    fn missing_closer_keeps_trailing_content() {
        let text = "(function()\n{\n// Inserted file a.js encoding='utf-8'\nvar a = 1;\n";
        let segments = split_bundle(text);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].content, "var a = 1;\n");
    }

    #[test]
    fn marker_like_line_with_bad_filename_stays_in_content() {
        let text = "\n// Inserted file a.js encoding='utf-8'\nline1\n// Inserted file ../evil.js encoding='utf-8'\nline2";
        let segments = split_bundle(text);
        assert_eq!(segments.len(), 1);
        assert_eq!(
            segments[0].content,
            "line1\n// Inserted file ../evil.js encoding='utf-8'\nline2"
        );
    }

    #[test]
    fn adjacent_marker_lines_yield_an_empty_segment() {
        let text = "\n// Inserted file a.js encoding='utf-8'\n// Inserted file b.js encoding='utf-8'\nvar b;";
        let segments = split_bundle(text);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].filename, "a.js");
        assert_eq!(segments[0].content, "");
        assert_eq!(segments[1].content, "var b;");
    }

    #[test]
    fn bundle_without_markers_goes_entirely_to_setup_js() {
        let segments = split_bundle("var standalone = 1;\n");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].filename, "setup.js");
        assert_eq!(segments[0].content, "var standalone = 1;\n");
    }

    #[test]
    fn empty_and_wrapper_only_bundles_produce_no_segments() {
        assert!(split_bundle("").is_empty());
        assert!(split_bundle("\"use strict\";\n(function()\n{\n})();\n").is_empty());
    }

    #[test]
    fn write_segment_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let segment = Segment {
            filename: "a.js".to_string(),
            encoding: None,
            content: "new".to_string(),
        };
        fs::write(dir.path().join("a.js"), "old").unwrap();
        let err = write_segment(&segment, dir.path()).unwrap_err();
        assert!(matches!(err, SplitError::OutputExists { .. }));
        assert_eq!(
            fs::read_to_string(dir.path().join("a.js")).unwrap(),
            "old"
        );
    }

    #[test]
    fn write_segments_keeps_files_written_before_a_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let segments = vec![
            Segment {
                filename: "a.js".to_string(),
                encoding: None,
                content: "a".to_string(),
            },
            Segment {
                filename: "b.js".to_string(),
                encoding: None,
                content: "b".to_string(),
            },
        ];
        fs::write(dir.path().join("b.js"), "old").unwrap();
        assert!(write_segments(&segments, dir.path()).is_err());
        assert_eq!(fs::read_to_string(dir.path().join("a.js")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dir.path().join("b.js")).unwrap(), "old");
    }
}
