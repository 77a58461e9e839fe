//! WordprocessingML builders and body manipulation helpers.
//!
//! Everything here works on raw markup strings. A "block" is one top-level
//! child of `<w:body>` (a paragraph or a table); the composer moves blocks
//! between packages without reinterpreting their content.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

use crate::error::Result;

/// EMU per millimeter (914400 EMU per inch / 25.4).
pub const EMU_PER_MM: i64 = 36_000;

/// Build a paragraph block, optionally tagged with a paragraph style id.
pub fn paragraph(text: &str, style_id: Option<&str>) -> String {
    let ppr = match style_id {
        Some(id) => format!("<w:pPr><w:pStyle w:val=\"{}\"/></w:pPr>", escape(id)),
        None => String::new(),
    };
    format!(
        "<w:p>{ppr}<w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        escape(text)
    )
}

/// Build a bordered table block from a header row and body rows.
///
/// Every row must have the same cell count as `header`; shorter rows are
/// padded with empty cells.
pub fn table(header: &[String], rows: &[Vec<String>]) -> String {
    let cols = header.len();
    let mut out = String::from(
        "<w:tbl><w:tblPr><w:tblW w:w=\"0\" w:type=\"auto\"/><w:tblBorders>\
         <w:top w:val=\"single\" w:sz=\"4\" w:color=\"auto\"/>\
         <w:left w:val=\"single\" w:sz=\"4\" w:color=\"auto\"/>\
         <w:bottom w:val=\"single\" w:sz=\"4\" w:color=\"auto\"/>\
         <w:right w:val=\"single\" w:sz=\"4\" w:color=\"auto\"/>\
         <w:insideH w:val=\"single\" w:sz=\"4\" w:color=\"auto\"/>\
         <w:insideV w:val=\"single\" w:sz=\"4\" w:color=\"auto\"/>\
         </w:tblBorders></w:tblPr>",
    );

    out.push_str(&table_row(header, cols, true));
    for row in rows {
        out.push_str(&table_row(row, cols, false));
    }
    out.push_str("</w:tbl>");
    out
}

fn table_row(cells: &[String], cols: usize, bold: bool) -> String {
    let mut out = String::from("<w:tr>");
    for i in 0..cols {
        let text = cells.get(i).map(String::as_str).unwrap_or("");
        let run = if bold {
            format!(
                "<w:r><w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">{}</w:t></w:r>",
                escape(text)
            )
        } else {
            format!("<w:r><w:t xml:space=\"preserve\">{}</w:t></w:r>", escape(text))
        };
        out.push_str(&format!("<w:tc><w:tcPr/><w:p>{run}</w:p></w:tc>"));
    }
    out.push_str("</w:tr>");
    out
}

/// Build an inline-image drawing run referencing a package relationship.
///
/// The drawing declares its own `wp:`/`a:`/`pic:` namespaces so the markup
/// stays valid when substituted into an arbitrary container template.
/// Extents are in EMU.
pub fn inline_image(rel_id: &str, cx: i64, cy: i64) -> String {
    format!(
        "<w:drawing><wp:inline distT=\"0\" distB=\"0\" distL=\"0\" distR=\"0\" \
         xmlns:wp=\"http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing\">\
         <wp:extent cx=\"{cx}\" cy=\"{cy}\"/>\
         <wp:docPr id=\"1\" name=\"image\"/>\
         <a:graphic xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\">\
         <a:graphicData uri=\"http://schemas.openxmlformats.org/drawingml/2006/picture\">\
         <pic:pic xmlns:pic=\"http://schemas.openxmlformats.org/drawingml/2006/picture\">\
         <pic:nvPicPr><pic:cNvPr id=\"0\" name=\"image\"/><pic:cNvPicPr/></pic:nvPicPr>\
         <pic:blipFill><a:blip r:embed=\"{rel}\"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>\
         <pic:spPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></pic:spPr>\
         </pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing>",
        rel = escape(rel_id),
    )
}

/// Wrap an inline-image drawing in a paragraph block.
pub fn image_paragraph(drawing: &str) -> String {
    format!("<w:p><w:r>{drawing}</w:r></w:p>")
}

/// Extract the top-level children of `parent` as raw markup strings.
///
/// The reader/writer round-trip keeps entity references and prefixes
/// exactly as they appear in the source, so blocks can be re-emitted into
/// another document verbatim.
pub fn split_children(xml: &str, parent: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let parent = parent.as_bytes();

    let mut blocks = Vec::new();
    let mut in_parent = false;
    let mut depth = 0usize;
    let mut current: Option<Writer<Vec<u8>>> = None;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) => {
                if !in_parent {
                    if e.name().as_ref() == parent {
                        in_parent = true;
                    }
                    continue;
                }
                let writer = current.get_or_insert_with(|| Writer::new(Vec::new()));
                writer.write_event(Event::Start(e))?;
                depth += 1;
            }
            Event::End(e) => {
                if !in_parent {
                    continue;
                }
                match current.as_mut() {
                    None => {
                        if e.name().as_ref() == parent {
                            in_parent = false;
                        }
                    }
                    Some(writer) => {
                        writer.write_event(Event::End(e))?;
                        depth -= 1;
                        if depth == 0 {
                            let writer = current.take().unwrap();
                            blocks.push(String::from_utf8_lossy(&writer.into_inner()).into_owned());
                        }
                    }
                }
            }
            Event::Empty(e) => {
                if !in_parent {
                    continue;
                }
                match current.as_mut() {
                    Some(writer) => writer.write_event(Event::Empty(e))?,
                    None => {
                        // A childless element is a complete block by itself.
                        let mut writer = Writer::new(Vec::new());
                        writer.write_event(Event::Empty(e))?;
                        blocks.push(String::from_utf8_lossy(&writer.into_inner()).into_owned());
                    }
                }
            }
            other => {
                if let Some(writer) = current.as_mut() {
                    writer.write_event(other)?;
                }
            }
        }
    }

    Ok(blocks)
}

/// Extract body blocks from a full `word/document.xml`, dropping section
/// properties (each fragment carries its own; only the master's survive).
pub fn body_blocks(document_xml: &str) -> Result<Vec<String>> {
    let blocks = split_children(document_xml, "w:body")?;
    Ok(blocks
        .into_iter()
        .filter(|b| !b.starts_with("<w:sectPr"))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_escapes_text() {
        let p = paragraph("a < b & c", None);
        assert!(p.contains("a &lt; b &amp; c"));
        assert!(!p.contains("<w:pPr>"));
    }

    #[test]
    fn test_paragraph_with_style() {
        let p = paragraph("Chapter", Some("Heading1"));
        assert!(p.contains("<w:pStyle w:val=\"Heading1\"/>"));
    }

    #[test]
    fn test_table_pads_short_rows() {
        let t = table(
            &["A".into(), "B".into(), "C".into()],
            &[vec!["1".into()]],
        );
        // 2 rows x 3 cells each
        assert_eq!(t.matches("<w:tr>").count(), 2);
        assert_eq!(t.matches("<w:tc>").count(), 6);
    }

    #[test]
    fn test_split_body_blocks() {
        let xml = "<w:document><w:body>\
                   <w:p><w:r><w:t>one</w:t></w:r></w:p>\
                   <w:tbl><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl>\
                   <w:p/>\
                   <w:sectPr><w:pgSz w:w=\"1\" w:h=\"2\"/></w:sectPr>\
                   </w:body></w:document>";
        let blocks = body_blocks(xml).unwrap();
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].contains("one"));
        assert!(blocks[1].starts_with("<w:tbl>"));
        assert_eq!(blocks[2], "<w:p/>");
    }

    #[test]
    fn test_split_preserves_entities() {
        let xml = "<w:document><w:body><w:p><w:r><w:t>a &amp; b</w:t></w:r></w:p></w:body></w:document>";
        let blocks = body_blocks(xml).unwrap();
        assert!(blocks[0].contains("a &amp; b"));
    }

    #[test]
    fn test_inline_image_extents() {
        let drawing = inline_image("rId7", 150 * EMU_PER_MM, 100 * EMU_PER_MM);
        assert!(drawing.contains("r:embed=\"rId7\""));
        assert!(drawing.contains("cx=\"5400000\""));
        assert!(drawing.contains("cy=\"3600000\""));
    }
}
