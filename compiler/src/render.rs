use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::{
    error::DocError,
    types::{Document, Field, Structure},
};

/// Marks a trailing doc comment on a field line.
pub const FIELD_COMMENT: &str = "//<!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// C-style `struct` declarations with the descriptions as comments.
    #[default]
    CHeader,
    Json,
}

/// Where rendered output goes. `-` on the command line means standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl From<&str> for Destination {
    fn from(arg: &str) -> Self {
        if arg == "-" {
            Destination::Stdout
        } else {
            Destination::File(PathBuf::from(arg))
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Stdout => write!(f, "<stdout>"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub fn render(document: &Document, format: OutputFormat) -> Result<String, DocError> {
    match format {
        OutputFormat::CHeader => Ok(render_c_header(document)),
        OutputFormat::Json => render_json(document),
    }
}

/// Renders every structure as a commented C `struct`, in parse order,
/// with one blank line between blocks.
pub fn render_c_header(document: &Document) -> String {
    let blocks: Vec<String> = document.structures.iter().map(generate_struct).collect();
    blocks.join("\n")
}

fn generate_struct(structure: &Structure) -> String {
    let fields: String = structure.fields.iter().map(generate_field).collect();
    format!(
        "/*\n\t{}\n*/\nstruct {} {{\n{}}};\n",
        structure.description, structure.name, fields
    )
}

fn generate_field(field: &Field) -> String {
    format!(
        "\t{}\t{};\t\t{} {}\n",
        field.type_, field.name, FIELD_COMMENT, field.description
    )
}

/// Pretty-printed JSON of the whole document.
pub fn render_json(document: &Document) -> Result<String, DocError> {
    Ok(serde_json::to_string_pretty(document)?)
}

pub fn write_output(destination: &Destination, text: &str) -> Result<(), DocError> {
    let unwritable = |source: io::Error| DocError::OutputUnwritable {
        path: destination.to_string(),
        source,
    };

    match destination {
        Destination::Stdout => {
            let mut out = io::stdout().lock();
            out.write_all(text.as_bytes()).map_err(unwritable)?;
            out.flush().map_err(unwritable)?;
        }
        Destination::File(path) => {
            fs::write(path, text).map_err(unwritable)?;
        }
    }

    debug!(%destination, bytes = text.len(), "wrote output");
    Ok(())
}
