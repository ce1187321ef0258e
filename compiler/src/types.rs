use serde::Serialize;

/// One content line left after preprocessing, with its 1-based number in the raw input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub text: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub structures: Vec<Structure>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name:        String,
    #[serde(rename = "type")]
    pub type_:       String,
    pub description: String,
    pub line:        usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Structure {
    pub name:        String,
    pub description: String,
    pub line:        usize,
    pub fields:      Vec<Field>,
}
