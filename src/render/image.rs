//! Image fragment renderer.

use std::fs;
use std::path::Path;

use image::GenericImageView;
use log::error;
use serde_json::Value;

use crate::docx::{xml, Package};
use crate::error::{Error, Result};
use crate::model::SharedContext;
use crate::render::{merged_context, substitute_document};

/// Render an image fragment.
///
/// A missing source file degrades to a visible placeholder paragraph (the
/// build must not die over one lost plot); a missing container template is
/// a hard error, because that is a caller configuration mistake.
pub(super) fn render(
    path: &Path,
    width_mm: u32,
    caption: Option<&str>,
    template: Option<&Path>,
    shared: &SharedContext,
    dest: &Path,
) -> Result<()> {
    if !path.exists() {
        error!("image not found: {}", path.display());
        let mut package = Package::new();
        package.set_body_blocks(&[xml::paragraph(
            &format!("[ERROR: image not found: {}]", path.display()),
            None,
        )]);
        return package.save(dest);
    }

    if let Some(template_path) = template {
        if !template_path.exists() {
            return Err(Error::MissingTemplate(template_path.to_path_buf()));
        }
        let mut package = Package::open(template_path)?;
        let drawing = embed_image(&mut package, path, width_mm)?;

        let mut local = SharedContext::new();
        local.insert("image".to_string(), Value::String(drawing));
        local.insert(
            "title".to_string(),
            Value::String(caption.unwrap_or_default().to_string()),
        );
        let context = merged_context(shared, local);
        substitute_document(&mut package, &context)?;
        package.save(dest)
    } else {
        let mut package = Package::new();
        let mut blocks = Vec::new();
        if let Some(caption) = caption {
            blocks.push(xml::paragraph(caption, Some("Caption")));
        }
        match embed_image(&mut package, path, width_mm) {
            Ok(drawing) => blocks.push(xml::image_paragraph(&drawing)),
            Err(e) => {
                // Keep the document alive; flag the failure inline.
                error!("failed to embed image {}: {e}", path.display());
                blocks.push(xml::paragraph(&format!("[IMAGE ERROR: {e}]"), None));
            }
        }
        package.set_body_blocks(&blocks);
        package.save(dest)
    }
}

/// Decode the bitmap, store it as a media part, and return the inline
/// drawing markup referencing it. Height follows the aspect ratio.
fn embed_image(package: &mut Package, path: &Path, width_mm: u32) -> Result<String> {
    let data = fs::read(path)?;
    let decoded = image::load_from_memory(&data)?;
    let (px_w, px_h) = decoded.dimensions();

    let cx = width_mm as i64 * xml::EMU_PER_MM;
    let cy = (cx as i128 * px_h as i128 / px_w.max(1) as i128) as i64;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");
    let rel_id = package.add_image(&data, ext)?;
    Ok(xml::inline_image(&rel_id, cx, cy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_png(path: &Path, w: u32, h: u32) {
        RgbaImage::from_pixel(w, h, Rgba([10, 20, 30, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_missing_source_renders_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("img.docx");
        let missing = dir.path().join("nope.png");

        render(&missing, 150, None, None, &SharedContext::new(), &dest).unwrap();

        let blocks = Package::open(&dest).unwrap().body_blocks().unwrap();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("image not found"));
        assert!(blocks[0].contains("nope.png"));
    }

    #[test]
    fn test_embeds_image_with_caption() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("plot.png");
        write_png(&source, 200, 100);
        let dest = dir.path().join("img.docx");

        render(&source, 150, Some("Figure 1"), None, &SharedContext::new(), &dest).unwrap();

        let package = Package::open(&dest).unwrap();
        let blocks = package.body_blocks().unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("Figure 1"));
        assert!(blocks[0].contains("Caption"));
        assert!(blocks[1].contains("w:drawing"));
        // 2:1 aspect ratio at 150mm wide
        assert!(blocks[1].contains(&format!("cx=\"{}\"", 150 * xml::EMU_PER_MM)));
        assert!(blocks[1].contains(&format!("cy=\"{}\"", 75 * xml::EMU_PER_MM)));
        // media part made it into the package
        assert!(package.part("word/media/image1.png").is_some());
    }

    #[test]
    fn test_missing_template_is_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("plot.png");
        write_png(&source, 10, 10);
        let dest = dir.path().join("img.docx");
        let template = dir.path().join("no-template.docx");

        let result = render(&source, 150, None, Some(&template), &SharedContext::new(), &dest);
        assert!(matches!(result, Err(Error::MissingTemplate(_))));
        assert!(!dest.exists());
    }

    #[test]
    fn test_undecodable_image_renders_error_paragraph() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("broken.png");
        fs::write(&source, b"not a png at all").unwrap();
        let dest = dir.path().join("img.docx");

        render(&source, 150, None, None, &SharedContext::new(), &dest).unwrap();

        let blocks = Package::open(&dest).unwrap().body_blocks().unwrap();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("IMAGE ERROR"));
    }

    #[test]
    fn test_template_substitution() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("plot.png");
        write_png(&source, 100, 100);

        // Build a container template: a docx whose body holds placeholders.
        let template_path = dir.path().join("container.docx");
        let mut template = Package::new();
        template.set_body_blocks(&[
            xml::paragraph("{{title}}", Some("Heading2")),
            "<w:p><w:r>{{{image}}}</w:r></w:p>".to_string(),
        ]);
        template.save(&template_path).unwrap();

        let dest = dir.path().join("img.docx");
        render(
            &source,
            100,
            Some("A square"),
            Some(&template_path),
            &SharedContext::new(),
            &dest,
        )
        .unwrap();

        let package = Package::open(&dest).unwrap();
        let body = package.document_xml().unwrap();
        assert!(body.contains("A square"));
        assert!(body.contains("w:drawing"));
        assert!(!body.contains("{{"));
    }
}
