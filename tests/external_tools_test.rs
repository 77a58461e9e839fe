//! Integration tests for fragment kinds that shell out to external tools.
//!
//! Each test probes for the binary it needs and returns early when it is
//! not installed.

use docweld::docx::Package;
use docweld::{tools, DocBuilder};

#[test]
fn test_latex_fragment_via_pandoc() {
    if !tools::pandoc_available() {
        eprintln!("pandoc not installed, skipping");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let mut builder = DocBuilder::new();
    builder
        .add_text("before", None)
        .add_latex(r"\textbf{bold claim}")
        .add_text("after", None);

    let out = dir.path().join("latex.docx");
    let report = builder.build(&out).unwrap();
    assert_eq!(report.composed(), 3);

    let body = Package::open(&out).unwrap().document_xml().unwrap();
    assert!(body.contains("bold claim"));
    let before = body.find("before").unwrap();
    let claim = body.find("bold claim").unwrap();
    let after = body.find("after").unwrap();
    assert!(before < claim && claim < after);
}

#[test]
fn test_html_fragment_via_pandoc() {
    if !tools::pandoc_available() {
        eprintln!("pandoc not installed, skipping");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let mut builder = DocBuilder::new();
    builder.add_html("<p>converted <em>markup</em></p>");

    let out = dir.path().join("html.docx");
    assert_eq!(builder.build(&out).unwrap().composed(), 1);

    let body = Package::open(&out).unwrap().document_xml().unwrap();
    assert!(body.contains("converted"));
    assert!(body.contains("markup"));
}

#[test]
fn test_raster_html_embeds_cropped_bitmap() {
    if !tools::wkhtmltoimage_available() {
        eprintln!("wkhtmltoimage not installed, skipping");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let mut builder = DocBuilder::new();
    builder.add_raster_html(
        "<html><body><div style=\"background:#000;width:60px;height:40px\"></div></body></html>",
        Some(80),
        Some("Snippet"),
        None,
    );

    let out = dir.path().join("raster.docx");
    let report = builder.build(&out).unwrap();
    assert_eq!(report.composed(), 1);

    let merged = Package::open(&out).unwrap();
    assert!(merged.document_xml().unwrap().contains("<w:drawing>"));
    assert!(merged.part("word/media/image1.png").is_some());
}

#[test]
fn test_missing_tool_skips_fragment() {
    if tools::pandoc_available() {
        // Only meaningful on hosts without pandoc.
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let mut builder = DocBuilder::new();
    builder.add_text("kept", None).add_latex(r"\emph{x}");

    let out = dir.path().join("no-pandoc.docx");
    let report = builder.build(&out).unwrap();
    assert_eq!(report.composed(), 1);
    assert_eq!(report.skipped(), 1);
}
