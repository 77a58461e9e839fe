//! Raw template fragment renderer.

use std::path::Path;

use crate::docx::Package;
use crate::error::{Error, Result};
use crate::model::SharedContext;
use crate::render::{merged_context, substitute_document};

/// Substitute a data context into a container template document.
///
/// Unlike content anomalies, template problems are caller bugs: a missing
/// template file or a substitution failure propagates as a hard error.
pub(super) fn render(
    path: &Path,
    local: &SharedContext,
    shared: &SharedContext,
    dest: &Path,
) -> Result<()> {
    if !path.exists() {
        return Err(Error::MissingTemplate(path.to_path_buf()));
    }

    let context = merged_context(shared, local.clone());
    let mut package = Package::open(path)?;
    substitute_document(&mut package, &context)?;
    package.save(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::xml;
    use serde_json::json;

    fn write_template(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("template.docx");
        let mut package = Package::new();
        package.set_body_blocks(&[xml::paragraph(body, None)]);
        package.save(&path).unwrap();
        path
    }

    #[test]
    fn test_substitutes_merged_context() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path(), "{{greeting}}, {{name}}!");

        let mut shared = SharedContext::new();
        shared.insert("greeting".into(), json!("Hello"));
        shared.insert("name".into(), json!("shared"));
        let mut local = SharedContext::new();
        local.insert("name".into(), json!("local"));

        let dest = dir.path().join("out.docx");
        render(&template, &local, &shared, &dest).unwrap();

        let body = Package::open(&dest).unwrap().document_xml().unwrap();
        // fragment-local value wins over the shared one
        assert!(body.contains("Hello, local!"));
    }

    #[test]
    fn test_missing_template_is_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.docx");
        let result = render(
            &dir.path().join("absent.docx"),
            &SharedContext::new(),
            &SharedContext::new(),
            &dest,
        );
        assert!(matches!(result, Err(Error::MissingTemplate(_))));
    }

    #[test]
    fn test_substitution_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        // Unclosed block expression: handlebars cannot parse this.
        let template = write_template(dir.path(), "{{#if flag}}no end");

        let dest = dir.path().join("out.docx");
        let result = render(&template, &SharedContext::new(), &SharedContext::new(), &dest);
        assert!(result.is_err());
        assert!(!dest.exists());
    }
}
