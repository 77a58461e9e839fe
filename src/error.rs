//! Error types for the docweld library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docweld operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering fragments or assembling
/// the final document.
///
/// Only a subset of these ever escapes [`crate::DocBuilder::build`]: the
/// orchestrator isolates per-fragment failures and records them in the
/// build report, so callers see an `Err` only for persistence failures
/// (and for direct renderer/composer use).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A referenced container or raw template does not exist.
    #[error("template not found: {0}")]
    MissingTemplate(PathBuf),

    /// Template substitution failed.
    #[error("template rendering error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// An external tool required by a fragment kind is not installed.
    #[error("external tool unavailable: {0}")]
    ToolUnavailable(&'static str),

    /// Markup conversion (pandoc) failed.
    #[error("markup conversion error: {0}")]
    Conversion(String),

    /// HTML rasterization (wkhtmltoimage) failed.
    #[error("rasterization error: {0}")]
    Rasterize(String),

    /// The document package is malformed or an expected part is missing.
    #[error("package error: {0}")]
    Package(String),

    /// Error reading or writing WordprocessingML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Error reading or writing the OPC container.
    #[error("container error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error decoding or encoding a bitmap.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The final document could not be persisted.
    #[error("failed to save document to {path}: {source}")]
    Save {
        /// Destination the build tried to write.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: Box<Error>,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap an error as a persistence failure for `path`.
    pub(crate) fn save(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::Save {
            path: path.into(),
            source: Box::new(source),
        }
    }
}
