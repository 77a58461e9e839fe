//! Modular Word document assembly.
//!
//! `docweld` builds a `.docx` document from an ordered list of content
//! fragments. Each fragment renders to its own single-fragment document in
//! a temporary workspace; the composer then welds the rendered artifacts,
//! in order, into one final package.
//!
//! Fragment kinds:
//!
//! - plain text paragraphs with optional named styles
//! - images embedded from files, directly or through a container template
//! - tables rendered natively or through a container template
//! - raw container templates populated from a data context
//! - LaTeX/HTML markup converted via `pandoc`
//! - HTML rasterized via `wkhtmltoimage`, auto-cropped, and embedded
//!
//! Data problems (a missing image file, an empty table) degrade to visible
//! placeholder content. Configuration problems (a missing template, an
//! unavailable external tool) fail that fragment's render; the build
//! continues without it and records the skip in the [`BuildReport`].
//!
//! # Example
//!
//! ```no_run
//! use docweld::{DocBuilder, TabularData};
//! use serde_json::json;
//!
//! let mut data = TabularData::new(["Min", "Max"]);
//! data.add_row("Vcc", vec![json!(3.135), json!(3.465)]);
//!
//! let mut builder = DocBuilder::new();
//! builder
//!     .add_title("Power Rails", 1)
//!     .add_table(data, Some("Supply limits"), true, None)
//!     .add_image("plots/vcc.png", None, Some("Vcc over temperature"), None);
//!
//! let report = builder.build("report.docx")?;
//! println!("{} fragments composed", report.composed());
//! # Ok::<(), docweld::Error>(())
//! ```

pub mod builder;
pub mod compose;
pub mod config;
pub mod crop;
pub mod docx;
pub mod error;
pub mod format;
pub mod model;
pub mod render;
pub mod tools;
pub mod workspace;

pub use builder::{BuildReport, DocBuilder, FragmentOutcome, OutcomeStatus};
pub use compose::Composer;
pub use config::BuildConfig;
pub use error::{Error, Result};
pub use model::{DataRow, Fragment, MarkupKind, SharedContext, TabularData};
pub use workspace::Workspace;
