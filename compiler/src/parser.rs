use crate::{
    error::DocError,
    types::{Document, Field, Line, Structure},
    utils::malformed,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

/// Introduces every marker inside a record line.
pub const SENTINEL: char = '$';
pub const STRUCTURE_MARKER: &str = "$CLASS:";
pub const FIELD_MARKER: &str = "$ELEMENT:";
/// Joins a field description with its continuation lines.
pub const DESCRIPTION_SEPARATOR: &str = " | ";

const EXPECTED_STRUCTURE: &str = "a structure header \"$CLASS:<name>,...$DESC:<text>\"";
const EXPECTED_FIELD: &str =
    "a field header \"$ELEMENT:<name>,...$DATATYPE:<type>,...$DESC:<text>\"";

lazy_static! {
    static ref STRUCTURE_HEADER: Regex =
        Regex::new(r"^\$CLASS:(?P<name>[^,$]+),[^$]*\$DESC:(?P<desc>.*)$").unwrap();
    static ref FIELD_HEADER: Regex = Regex::new(
        r"^\$ELEMENT:(?P<name>[^,$]+),[^$]*\$DATATYPE:(?P<type>[^,$]+),[^$]*\$DESC:(?P<desc>.*)$"
    )
    .unwrap();
}

/// What the line at a given cursor position is, as far as the driving loop cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    StructureHeader,
    FieldHeader,
    /// Free text continuing the previous field's description.
    Continuation,
    /// Starts with the sentinel but with no known marker, or is empty.
    Other,
    EndOfInput,
}

pub fn line_kind(text: &str) -> LineKind {
    if text.starts_with(STRUCTURE_MARKER) {
        LineKind::StructureHeader
    } else if text.starts_with(FIELD_MARKER) {
        LineKind::FieldHeader
    } else if text.is_empty() || text.starts_with(SENTINEL) {
        LineKind::Other
    } else {
        LineKind::Continuation
    }
}

/// Classifies `lines[index]` without ever reading past the end.
pub fn classify(lines: &[Line], index: usize) -> LineKind {
    match lines.get(index) {
        Some(line) => line_kind(&line.text),
        None => LineKind::EndOfInput,
    }
}

fn current_line<'a>(
    lines:    &'a [Line],
    index:    usize,
    expected: &'static str,
) -> Result<&'a Line, DocError> {
    lines.get(index).ok_or_else(|| DocError::UnexpectedEndOfInput {
        // The last line read, e.g. a structure header still missing its field.
        line: index
            .checked_sub(1)
            .and_then(|i| lines.get(i))
            .map_or(0, |l| l.line),
        expected,
    })
}

/// Parses the structure header at `*index` and moves past it.
/// The returned structure has no fields yet.
pub fn parse_header(lines: &[Line], index: &mut usize) -> Result<Structure, DocError> {
    let line = current_line(lines, *index, EXPECTED_STRUCTURE)?;
    let caps = STRUCTURE_HEADER
        .captures(&line.text)
        .ok_or_else(|| malformed(line, EXPECTED_STRUCTURE))?;

    *index += 1;
    Ok(Structure {
        name:        caps["name"].to_string(),
        description: caps["desc"].to_string(),
        line:        line.line,
        fields:      Vec::new(),
    })
}

/// Parses the field header at `*index` together with any continuation lines
/// after it, leaving `*index` on the first line that is not part of the field.
pub fn parse_field(lines: &[Line], index: &mut usize) -> Result<Field, DocError> {
    let line = current_line(lines, *index, EXPECTED_FIELD)?;
    let caps = FIELD_HEADER
        .captures(&line.text)
        .ok_or_else(|| malformed(line, EXPECTED_FIELD))?;

    let mut description = caps["desc"].to_string();
    *index += 1;

    while let Some(next) = lines
        .get(*index)
        .filter(|l| line_kind(&l.text) == LineKind::Continuation)
    {
        description.push_str(DESCRIPTION_SEPARATOR);
        description.push_str(&next.text);
        *index += 1;
    }

    Ok(Field {
        name: caps["name"].to_string(),
        type_: caps["type"].to_string(),
        description,
        line: line.line,
    })
}

/// Turns the whole preprocessed line sequence into structures.
///
/// Every structure gets at least one field: a header must be followed by a
/// field header. Fields keep being read while the next line is a field header;
/// anything else closes the structure, and whatever follows must then open a
/// new one.
pub fn parse_document(lines: &[Line]) -> Result<Document, DocError> {
    if lines.is_empty() {
        return Err(DocError::EmptyInput);
    }

    let mut structures = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let mut structure = parse_header(lines, &mut index)?;

        loop {
            let field = parse_field(lines, &mut index)?;
            trace!(
                structure = %structure.name,
                field = %field.name,
                type_ = %field.type_,
                "parsed field"
            );
            structure.fields.push(field);

            if classify(lines, index) != LineKind::FieldHeader {
                break;
            }
        }

        debug!(
            name = %structure.name,
            line = structure.line,
            fields = structure.fields.len(),
            "parsed structure"
        );
        structures.push(structure);
    }

    Ok(Document { structures })
}
