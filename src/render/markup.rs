//! Markup fragment renderer (LaTeX / HTML via pandoc).

use std::path::Path;

use log::debug;

use crate::docx::Package;
use crate::error::Result;
use crate::model::MarkupKind;
use crate::tools;

/// Convert markup to document content with pandoc.
///
/// Empty markup renders an empty artifact without ever invoking the
/// converter, so it succeeds even when pandoc is not installed. Non-empty
/// markup with a missing pandoc installation, or a conversion failure, is
/// a hard error.
pub(super) fn render(source: &str, kind: MarkupKind, dest: &Path) -> Result<()> {
    if source.trim().is_empty() {
        debug!("empty {} markup, rendering empty artifact", kind.pandoc_format());
        return Package::new().save(dest);
    }
    tools::pandoc_convert(source, kind.pandoc_format(), dest)
}
