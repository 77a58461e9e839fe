//! Rasterized-HTML fragment renderer.

use std::path::Path;

use log::{error, warn};

use crate::crop::auto_crop;
use crate::docx::{xml, Package};
use crate::error::{Error, Result};
use crate::model::SharedContext;
use crate::tools;

/// White tolerance used when trimming the rasterized bitmap.
const CROP_TOLERANCE: u8 = 20;

/// Rasterize HTML to a bitmap, trim its background margin, and embed it
/// exactly as an image fragment would.
///
/// A missing wkhtmltoimage installation is a hard error; a rasterization
/// failure degrades to a visible error paragraph.
pub(super) fn render(
    html: &str,
    width_mm: u32,
    title: Option<&str>,
    template: Option<&Path>,
    shared: &SharedContext,
    dest: &Path,
) -> Result<()> {
    let bitmap_path = dest.with_extension("png");

    match tools::rasterize_html(html, &bitmap_path) {
        Ok(()) => {}
        Err(e @ Error::ToolUnavailable(_)) => return Err(e),
        Err(e) => {
            error!("rasterization failed: {e}");
            let mut package = Package::new();
            package.set_body_blocks(&[xml::paragraph(&format!("[RASTER ERROR: {e}]"), None)]);
            return package.save(dest);
        }
    }

    // Trim the viewport margin; keep the original bitmap if cropping has
    // nothing to work with.
    match image::open(&bitmap_path) {
        Ok(bitmap) => {
            if let Some(cropped) = auto_crop(&bitmap, CROP_TOLERANCE) {
                if let Err(e) = cropped.save(&bitmap_path) {
                    warn!("could not write cropped bitmap: {e}");
                }
            }
        }
        Err(e) => warn!("could not decode rasterized bitmap for cropping: {e}"),
    }

    super::image::render(&bitmap_path, width_mm, title, template, shared, dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rasterize_and_embed() {
        if !tools::wkhtmltoimage_available() {
            eprintln!("wkhtmltoimage not installed, skipping");
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("raster.docx");
        render(
            "<html><body><table border=\"1\"><tr><td>cell</td></tr></table></body></html>",
            120,
            Some("A table"),
            None,
            &SharedContext::new(),
            &dest,
        )
        .unwrap();

        let package = Package::open(&dest).unwrap();
        let body = package.document_xml().unwrap();
        assert!(body.contains("w:drawing"));
        assert!(body.contains("A table"));
    }
}
