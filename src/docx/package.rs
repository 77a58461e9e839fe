//! In-memory OPC package: the docx container format.
//!
//! A [`Package`] is a map of part names to bytes, with helpers for the parts
//! this crate manipulates: the document body, the document relationships,
//! and media. Packages round-trip through zip on open/save; everything in
//! between happens in memory.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::Utc;
use log::debug;
use quick_xml::escape::{escape, unescape};
use quick_xml::events::Event;
use quick_xml::Reader;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::styles::STYLES_XML;
use super::xml;
use crate::error::{Error, Result};

/// Relationship type for embedded images.
pub const REL_TYPE_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Default Extension="jpeg" ContentType="image/jpeg"/><Default Extension="jpg" ContentType="image/jpeg"/><Default Extension="gif" ContentType="image/gif"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const EMPTY_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"></Relationships>"#;

const DOCUMENT_PROLOGUE: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
    <w:document \
    xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\" \
    xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
    xmlns:wp=\"http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing\" \
    xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
    xmlns:pic=\"http://schemas.openxmlformats.org/drawingml/2006/picture\">\
    <w:body>";

const DOCUMENT_EPILOGUE: &str = "<w:sectPr>\
    <w:pgSz w:w=\"11906\" w:h=\"16838\"/>\
    <w:pgMar w:top=\"1134\" w:right=\"1134\" w:bottom=\"1134\" w:left=\"1134\" w:header=\"708\" w:footer=\"708\" w:gutter=\"0\"/>\
    </w:sectPr></w:body></w:document>";

/// One entry of a part's relationship file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship id (`rId1`, `rId2`, ...).
    pub id: String,
    /// Relationship type URI.
    pub rel_type: String,
    /// Target, relative to the owning part (or an absolute URI if external).
    pub target: String,
    /// Whether the target lives outside the package.
    pub external: bool,
}

/// An OPC package held fully in memory.
#[derive(Debug, Clone)]
pub struct Package {
    entries: BTreeMap<String, Vec<u8>>,
}

impl Package {
    /// Create a fresh single-document package with an empty body.
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("[Content_Types].xml".to_string(), CONTENT_TYPES.as_bytes().to_vec());
        entries.insert("_rels/.rels".to_string(), ROOT_RELS.as_bytes().to_vec());
        entries.insert("docProps/core.xml".to_string(), core_properties().into_bytes());
        entries.insert("word/styles.xml".to_string(), STYLES_XML.as_bytes().to_vec());
        entries.insert(
            "word/_rels/document.xml.rels".to_string(),
            DOCUMENT_RELS.as_bytes().to_vec(),
        );

        let mut package = Self { entries };
        package.set_body_blocks(&[]);
        package
    }

    /// Open an existing package from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)?;

        let mut entries = BTreeMap::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut data)?;
            entries.insert(name, data);
        }

        if !entries.contains_key("word/document.xml") {
            return Err(Error::Package(format!(
                "{} has no word/document.xml part",
                path.display()
            )));
        }
        Ok(Self { entries })
    }

    /// Raw bytes of a part, if present.
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Insert or replace a part.
    pub fn insert_part(&mut self, name: impl Into<String>, data: Vec<u8>) {
        self.entries.insert(name.into(), data);
    }

    /// The main document part as a string.
    pub fn document_xml(&self) -> Result<String> {
        let data = self
            .part("word/document.xml")
            .ok_or_else(|| Error::Package("missing word/document.xml".to_string()))?;
        Ok(String::from_utf8_lossy(data).into_owned())
    }

    /// Replace the main document part.
    pub fn set_document_xml(&mut self, xml: String) {
        self.insert_part("word/document.xml", xml.into_bytes());
    }

    /// Top-level body blocks of the main document part.
    pub fn body_blocks(&self) -> Result<Vec<String>> {
        xml::body_blocks(&self.document_xml()?)
    }

    /// Rebuild the main document part around the given body blocks.
    pub fn set_body_blocks(&mut self, blocks: &[String]) {
        let mut doc = String::with_capacity(
            DOCUMENT_PROLOGUE.len()
                + DOCUMENT_EPILOGUE.len()
                + blocks.iter().map(String::len).sum::<usize>(),
        );
        doc.push_str(DOCUMENT_PROLOGUE);
        for block in blocks {
            doc.push_str(block);
        }
        doc.push_str(DOCUMENT_EPILOGUE);
        self.set_document_xml(doc);
    }

    /// Parse the main document part's relationships.
    pub fn relationships(&self) -> Result<Vec<Relationship>> {
        let data = match self.part("word/_rels/document.xml.rels") {
            Some(data) => data,
            None => return Ok(Vec::new()),
        };
        let source = String::from_utf8_lossy(data).into_owned();

        let mut reader = Reader::from_str(&source);
        let mut rels = Vec::new();
        loop {
            match reader.read_event()? {
                Event::Eof => break,
                Event::Empty(e) | Event::Start(e) => {
                    if e.local_name().as_ref() != b"Relationship" {
                        continue;
                    }
                    let mut id = String::new();
                    let mut rel_type = String::new();
                    let mut target = String::new();
                    let mut external = false;
                    for attr in e.attributes() {
                        let attr = attr.map_err(|e| Error::Package(format!("bad relationship attribute: {e}")))?;
                        let value = String::from_utf8_lossy(&attr.value);
                        let value = unescape(&value)
                            .map_err(|e| Error::Package(format!("bad relationship attribute: {e}")))?
                            .into_owned();
                        match attr.key.as_ref() {
                            b"Id" => id = value,
                            b"Type" => rel_type = value,
                            b"Target" => target = value,
                            b"TargetMode" => external = value == "External",
                            _ => {}
                        }
                    }
                    rels.push(Relationship { id, rel_type, target, external });
                }
                _ => {}
            }
        }
        Ok(rels)
    }

    /// Add a relationship to the main document part, returning its new id.
    pub fn add_relationship(&mut self, rel_type: &str, target: &str, external: bool) -> Result<String> {
        let id = self.next_rel_id()?;
        let mode = if external { " TargetMode=\"External\"" } else { "" };
        let entry = format!(
            "<Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"{mode}/>",
            escape(&id),
            escape(rel_type),
            escape(target),
        );

        let rels = self
            .part("word/_rels/document.xml.rels")
            .map(|d| String::from_utf8_lossy(d).into_owned())
            .unwrap_or_else(|| EMPTY_RELS.to_string());
        let rels = match rels.rfind("</Relationships>") {
            Some(pos) => {
                let mut out = rels;
                out.insert_str(pos, &entry);
                out
            }
            None => return Err(Error::Package("malformed document.xml.rels".to_string())),
        };
        self.insert_part("word/_rels/document.xml.rels", rels.into_bytes());
        Ok(id)
    }

    /// Store an image as a media part and relate it to the document.
    ///
    /// Returns the relationship id to reference from an inline drawing.
    pub fn add_image(&mut self, data: &[u8], ext: &str) -> Result<String> {
        let ext = ext.to_ascii_lowercase();
        self.ensure_content_type_default(&ext)?;

        let mut index = self
            .entries
            .keys()
            .filter(|k| k.starts_with("word/media/"))
            .count()
            + 1;
        while self.entries.contains_key(&format!("word/media/image{index}.{ext}")) {
            index += 1;
        }
        let name = format!("word/media/image{index}.{ext}");

        debug!("adding media part {name} ({} bytes)", data.len());
        self.insert_part(name.clone(), data.to_vec());
        self.add_relationship(REL_TYPE_IMAGE, &name["word/".len()..], false)
    }

    /// Write the package to disk as a zip container.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, data) in &self.entries {
            zip.start_file(name.clone(), options)?;
            zip.write_all(data)?;
        }
        zip.finish()?;
        Ok(())
    }

    fn next_rel_id(&self) -> Result<String> {
        let max = self
            .relationships()?
            .iter()
            .filter_map(|r| r.id.strip_prefix("rId").and_then(|n| n.parse::<u32>().ok()))
            .max()
            .unwrap_or(0);
        Ok(format!("rId{}", max + 1))
    }

    fn ensure_content_type_default(&mut self, ext: &str) -> Result<()> {
        let types = self
            .part("[Content_Types].xml")
            .map(|d| String::from_utf8_lossy(d).into_owned())
            .ok_or_else(|| Error::Package("missing [Content_Types].xml".to_string()))?;
        if types.contains(&format!("Extension=\"{ext}\"")) {
            return Ok(());
        }

        let content_type = match ext {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            _ => "application/octet-stream",
        };
        let entry = format!("<Default Extension=\"{ext}\" ContentType=\"{content_type}\"/>");
        let types = match types.rfind("</Types>") {
            Some(pos) => {
                let mut out = types;
                out.insert_str(pos, &entry);
                out
            }
            None => return Err(Error::Package("malformed [Content_Types].xml".to_string())),
        };
        self.insert_part("[Content_Types].xml", types.into_bytes());
        Ok(())
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}

fn core_properties() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <cp:coreProperties \
         xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         xmlns:dcterms=\"http://purl.org/dc/terms/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
         <dc:creator>docweld</dc:creator>\
         <dcterms:created xsi:type=\"dcterms:W3CDTF\">{}</dcterms:created>\
         </cp:coreProperties>",
        Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_package_has_empty_body() {
        let package = Package::new();
        assert!(package.body_blocks().unwrap().is_empty());
        assert!(package.part("word/styles.xml").is_some());
    }

    #[test]
    fn test_body_blocks_round_trip() {
        let mut package = Package::new();
        let blocks = vec![
            xml::paragraph("first", None),
            xml::paragraph("second", Some("Heading1")),
        ];
        package.set_body_blocks(&blocks);

        let read_back = package.body_blocks().unwrap();
        assert_eq!(read_back.len(), 2);
        assert!(read_back[0].contains("first"));
        assert!(read_back[1].contains("Heading1"));
    }

    #[test]
    fn test_save_and_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.docx");

        let mut package = Package::new();
        package.set_body_blocks(&[xml::paragraph("persisted", None)]);
        package.save(&path).unwrap();

        let reopened = Package::open(&path).unwrap();
        let blocks = reopened.body_blocks().unwrap();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("persisted"));
    }

    #[test]
    fn test_add_image_allocates_rel_and_media() {
        let mut package = Package::new();
        let rel_id = package.add_image(&[0x89, 0x50, 0x4e, 0x47], "png").unwrap();

        let rels = package.relationships().unwrap();
        let rel = rels.iter().find(|r| r.id == rel_id).unwrap();
        assert_eq!(rel.rel_type, REL_TYPE_IMAGE);
        assert!(rel.target.starts_with("media/image"));
        assert!(!rel.external);
        assert!(package.part(&format!("word/{}", rel.target)).is_some());
    }

    #[test]
    fn test_rel_ids_do_not_collide() {
        let mut package = Package::new();
        let a = package.add_relationship(REL_TYPE_IMAGE, "media/a.png", false).unwrap();
        let b = package.add_relationship(REL_TYPE_IMAGE, "media/b.png", false).unwrap();
        assert_ne!(a, b);

        let ids: Vec<_> = package.relationships().unwrap().into_iter().map(|r| r.id).collect();
        assert!(ids.contains(&a));
        assert!(ids.contains(&b));
    }

    #[test]
    fn test_external_relationship_mode() {
        let mut package = Package::new();
        package
            .add_relationship(
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink",
                "https://example.com",
                true,
            )
            .unwrap();

        let rels = package.relationships().unwrap();
        let rel = rels.iter().find(|r| r.external).unwrap();
        assert_eq!(rel.target, "https://example.com");
    }

    #[test]
    fn test_open_rejects_non_document_zip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a-doc.zip");
        let file = File::create(&path).unwrap();
        let mut zip = ZipWriter::new(file);
        zip.start_file("readme.txt", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"hello").unwrap();
        zip.finish().unwrap();

        assert!(matches!(Package::open(&path), Err(Error::Package(_))));
    }
}
