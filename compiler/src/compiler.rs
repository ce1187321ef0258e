use std::path::Path;
use tracing::info;

use crate::{
    error::DocError,
    parser::parse_document,
    preprocess::{load_input, preprocess},
    render::render_c_header,
    types::Document,
};

/// Preprocess and parse documentation text into a `Document`.
/// Returns `Err(DocError)` if the text holds no records or any record is malformed.
pub fn compile_document(text: &str) -> Result<Document, DocError> {
    let lines = preprocess(text);
    parse_document(&lines)
}

/// Same as `compile_document`, reading the text from `path` first.
pub fn compile_file(path: &Path) -> Result<Document, DocError> {
    let lines = load_input(path)?;
    let document = parse_document(&lines)?;
    info!(
        path = %path.display(),
        structures = document.structures.len(),
        "parsed input"
    );
    Ok(document)
}

pub fn compile_to_c_header(text: &str) -> Result<String, DocError> {
    let document = compile_document(text)?;
    Ok(render_c_header(&document))
}
