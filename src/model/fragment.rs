//! Content fragments: the units the builder assembles a document from.

use std::path::PathBuf;

use crate::model::SharedContext;
use crate::model::TabularData;

/// One piece of content to be rendered to its own single-fragment document
/// and then welded, in order, into the final output.
///
/// Fragments are immutable once appended to a builder; rendering never
/// mutates them.
#[derive(Debug, Clone)]
pub enum Fragment {
    /// A paragraph of text, optionally tagged with a named paragraph style.
    Text {
        /// Paragraph content.
        text: String,
        /// Style name ("Heading 1", "Normal"); unknown names fall back to
        /// the default style at render time.
        style: Option<String>,
    },

    /// An image embedded from a file.
    Image {
        /// Path to the source bitmap.
        path: PathBuf,
        /// Embedded width in millimeters; height keeps the aspect ratio.
        width_mm: u32,
        /// Caption paragraph placed above the image.
        caption: Option<String>,
        /// Container template to substitute the image into instead of
        /// embedding it directly.
        template: Option<PathBuf>,
    },

    /// A table rendered either natively or through a container template.
    Table {
        /// The data to lay out.
        data: TabularData,
        /// Title heading placed above a native table.
        title: Option<String>,
        /// Format numeric cells in engineering notation.
        eng_format: bool,
        /// Header-column label passed to container templates.
        header_label: String,
        /// Label for the index column.
        index_label: String,
        /// Container template, if any.
        template: Option<PathBuf>,
    },

    /// A raw container template populated with an arbitrary data context.
    Template {
        /// Path to the template document.
        path: PathBuf,
        /// Fragment-local variables; these win over the shared context.
        context: SharedContext,
    },

    /// Markup converted to document content by an external converter.
    Markup {
        /// Markup source text.
        source: String,
        /// Which markup language the source is written in.
        kind: MarkupKind,
    },

    /// HTML rasterized to a bitmap and embedded like an image.
    RasterHtml {
        /// HTML source text.
        html: String,
        /// Embedded width in millimeters.
        width_mm: u32,
        /// Caption for the embedded bitmap.
        title: Option<String>,
        /// Container template forwarded to the image embedding step.
        template: Option<PathBuf>,
    },
}

impl Fragment {
    /// Short kind tag used in logs and build reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Fragment::Text { .. } => "text",
            Fragment::Image { .. } => "image",
            Fragment::Table { .. } => "table",
            Fragment::Template { .. } => "template",
            Fragment::Markup { kind: MarkupKind::Latex, .. } => "latex",
            Fragment::Markup { kind: MarkupKind::Html, .. } => "html",
            Fragment::RasterHtml { .. } => "raster-html",
        }
    }
}

/// Markup languages the external converter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupKind {
    /// LaTeX source.
    Latex,
    /// HTML source, converted to native document content.
    Html,
}

impl MarkupKind {
    /// The pandoc source-format name.
    pub fn pandoc_format(self) -> &'static str {
        match self {
            MarkupKind::Latex => "latex",
            MarkupKind::Html => "html",
        }
    }
}
