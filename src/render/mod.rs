//! Fragment renderers.
//!
//! Each fragment kind renders itself to a complete single-fragment docx at
//! a destination path. [`render_fragment`] is the uniform contract the
//! orchestrator drives; the per-kind modules own their fallback policy
//! (placeholder content for data problems, hard errors for caller
//! configuration mistakes).

mod image;
mod markup;
mod raster;
mod table;
mod template;
mod text;

use std::path::Path;

use serde_json::Value;

use crate::docx::Package;
use crate::error::Result;
use crate::model::{Fragment, SharedContext};

/// Render one fragment to a single-fragment document at `dest`.
///
/// On success exactly one file exists at `dest` containing the fragment's
/// rendered content. Neither the fragment nor the shared context is
/// mutated. Errors mean no usable artifact was produced; soft content
/// anomalies (missing image source, unknown style, empty input) render a
/// visible placeholder and still succeed.
pub fn render_fragment(fragment: &Fragment, dest: &Path, shared: &SharedContext) -> Result<()> {
    match fragment {
        Fragment::Text { text, style } => text::render(text, style.as_deref(), dest),
        Fragment::Image { path, width_mm, caption, template } => image::render(
            path,
            *width_mm,
            caption.as_deref(),
            template.as_deref(),
            shared,
            dest,
        ),
        Fragment::Table { data, title, eng_format, header_label, index_label, template } => {
            table::render(
                data,
                title.as_deref(),
                *eng_format,
                header_label,
                index_label,
                template.as_deref(),
                shared,
                dest,
            )
        }
        Fragment::Template { path, context } => template::render(path, context, shared, dest),
        Fragment::Markup { source, kind } => markup::render(source, *kind, dest),
        Fragment::RasterHtml { html, width_mm, title, template } => raster::render(
            html,
            *width_mm,
            title.as_deref(),
            template.as_deref(),
            shared,
            dest,
        ),
    }
}

/// Merge the shared context with fragment-local values; local values win
/// on key collisions.
pub(crate) fn merged_context(shared: &SharedContext, local: SharedContext) -> Value {
    let mut merged = shared.clone();
    for (key, value) in local {
        merged.insert(key, value);
    }
    Value::Object(merged)
}

/// Substitute handlebars expressions in a package's main document part.
pub(crate) fn substitute_document(package: &mut Package, context: &Value) -> Result<()> {
    let handlebars = handlebars::Handlebars::new();
    let rendered = handlebars.render_template(&package.document_xml()?, context)?;
    package.set_document_xml(rendered);
    Ok(())
}
