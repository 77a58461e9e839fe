//! Text fragment renderer.

use std::path::Path;

use log::warn;

use crate::docx::{styles, xml, Package};
use crate::error::Result;

/// Render a text paragraph. Never fails on content: an unknown style name
/// falls back to the default style with a warning rather than aborting the
/// whole document.
pub(super) fn render(text: &str, style: Option<&str>, dest: &Path) -> Result<()> {
    let mut package = Package::new();

    if !text.is_empty() {
        let style_id = style.and_then(|name| {
            let id = styles::normalize_style_name(name);
            if styles::is_known_style(&id) {
                Some(id)
            } else {
                warn!("style '{name}' not found, using default style");
                None
            }
        });
        package.set_body_blocks(&[xml::paragraph(text, style_id.as_deref())]);
    }

    package.save(dest)
}
