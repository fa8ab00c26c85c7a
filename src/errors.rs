//! Error types with rich diagnostics using miette
//!
//! Grammar failures carry the offending byte offset and a source span so a
//! bad `pathData` attribute renders with a caret under the first bad
//! character.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::combinator::Failure;
use crate::types::NumericError;

// ============================================================================
// Parse Errors
// ============================================================================

/// Path data did not match the grammar.
#[derive(Error, Diagnostic, Debug)]
#[error("invalid path data: {message}")]
#[diagnostic(code(vecdraw::parse::path_data))]
pub struct ParseError {
    pub message: String,
    /// Byte offset of the first bad character
    pub offset: usize,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
}

impl ParseError {
    /// Attach source context to an engine failure.
    pub fn from_failure(name: &str, source: &str, failure: Failure) -> Self {
        let offset = failure.position.min(source.len());
        let len = source
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .map_or(0, char::len_utf8);
        ParseError {
            message: failure.message.into_owned(),
            offset,
            src: NamedSource::new(name, source.to_string()),
            span: (offset, len).into(),
        }
    }
}

// ============================================================================
// Document Errors
// ============================================================================

/// The element tree does not describe a usable vector document.
///
/// A document is built completely or not at all; the first failure is
/// returned and nothing of the partial tree survives.
#[derive(Error, Diagnostic, Debug)]
pub enum DocumentError {
    #[error("expected a `vector` root element, found `{tag}`")]
    #[diagnostic(code(vecdraw::document::unexpected_root))]
    UnexpectedRoot { tag: String },

    #[error("{element} is missing required attribute `{attribute}`")]
    #[diagnostic(code(vecdraw::document::missing_attribute))]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("viewport must be strictly positive, got {width}x{height}")]
    #[diagnostic(
        code(vecdraw::document::invalid_viewport),
        help("viewportWidth and viewportHeight define the coordinate space of all path data")
    )]
    InvalidViewport { width: f64, height: f64 },

    #[error("{element} has no path data")]
    #[diagnostic(code(vecdraw::document::missing_path_data))]
    MissingPathData { element: String },

    #[error("invalid value `{value}` for `{attribute}` on {element}: {reason}")]
    #[diagnostic(code(vecdraw::document::invalid_attribute))]
    InvalidAttribute {
        element: String,
        attribute: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid path data in {element}")]
    #[diagnostic(code(vecdraw::document::path_data))]
    PathData {
        element: String,
        #[source]
        #[diagnostic_source]
        source: ParseError,
    },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur when a render is requested
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("invalid target size {width}x{height}: {source}")]
    #[diagnostic(code(vecdraw::render::invalid_target_size))]
    InvalidTargetSize {
        width: f64,
        height: f64,
        #[source]
        source: NumericError,
    },
}
