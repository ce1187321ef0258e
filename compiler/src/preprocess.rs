use std::fs;
use std::path::Path;
use tracing::debug;

use crate::{error::DocError, types::Line};

/// Lines starting with this character (after indentation) are comments.
pub const COMMENT_MARKER: char = '*';
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Strips indentation, drops blank and comment lines, and remembers where each
/// surviving line came from.
pub fn preprocess(text: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);

    for (i, raw) in text.lines().enumerate() {
        let trimmed = raw.trim_start();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
            continue;
        }
        lines.push(Line {
            text: trimmed.to_string(),
            line: i + 1,
        });
    }

    lines
}

/// Reads `path` and preprocesses it.
pub fn load_input(path: &Path) -> Result<Vec<Line>, DocError> {
    if !path.exists() {
        return Err(DocError::InputNotFound { path: path.to_path_buf() });
    }

    let text = fs::read_to_string(path).map_err(|source| DocError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let lines = preprocess(&text);
    debug!(path = %path.display(), lines = lines.len(), "loaded input");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_comments_and_blank_lines() {
        let text = "   * ignore me\n\n\t$CLASS:A,x$DESC:d\n    \n  continued  \n";
        let lines = preprocess(text);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "$CLASS:A,x$DESC:d");
        assert_eq!(lines[0].line, 3);
        // Trailing whitespace survives, only indentation is removed.
        assert_eq!(lines[1].text, "continued  ");
        assert_eq!(lines[1].line, 5);
        assert!(lines.iter().all(|l| !l.text.starts_with('*')));
    }

    #[test]
    fn test_accepts_crlf() {
        let lines = preprocess("$CLASS:A,x$DESC:d\r\n\r\n  tail\r\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "$CLASS:A,x$DESC:d");
        assert_eq!(lines[1].text, "tail");
        assert_eq!(lines[1].line, 3);
    }

    #[test]
    fn test_strips_byte_order_mark() {
        let text = "\u{FEFF}$CLASS:Motor,x$DESC:d\n$ELEMENT:m,x$DATATYPE:float,x$DESC:e";
        let lines = preprocess(text);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "$CLASS:Motor,x$DESC:d");
        assert_eq!(lines[0].line, 1);
    }

    #[test]
    fn test_comment_marker_only_at_line_start() {
        let lines = preprocess("note * not a comment\n*comment");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "note * not a comment");
    }

    #[test]
    fn test_missing_input_file() {
        let path = std::env::temp_dir().join("rktdoc-preprocess-does-not-exist.txt");
        match load_input(&path) {
            Err(DocError::InputNotFound { path: p }) => assert_eq!(p, path),
            other => panic!("expected InputNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_is_unreadable() {
        let dir = std::env::temp_dir();
        assert!(matches!(load_input(&dir), Err(DocError::InputUnreadable { .. })));
    }
}
