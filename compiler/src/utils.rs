use crate::{error::DocError, types::Line};

pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

pub fn malformed(line: &Line, expected: &'static str) -> DocError {
    DocError::MalformedRecord {
        line:  line.line,
        expected,
        found: quote(&line.text),
    }
}
