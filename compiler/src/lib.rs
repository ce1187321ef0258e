//! rktdoc-compiler
//!
//! This crate implements:
//!  1) A line preprocessor for RKT format documentation (`$CLASS:` / `$ELEMENT:` records),
//!  2) A record parser turning those lines into structures and fields,
//!  3) Renderers for C-style structure listings and JSON,
//!  4) Error types (`DocError`).

pub mod error;
pub mod types;
pub mod utils;
pub mod preprocess;
pub mod parser;
pub mod render;
pub mod compiler;

pub use compiler::{compile_document, compile_file, compile_to_c_header};
pub use error::DocError;
pub use render::{render_c_header, render_json, write_output, Destination, OutputFormat};
pub use types::{Document, Field, Line, Structure};
