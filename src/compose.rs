//! Sequential document composition.
//!
//! The composer accumulates the final document by appending the body
//! blocks of one fragment package at a time. Moving a block between
//! packages means deep-copying whatever the block references: media parts
//! and external link targets come along under freshly allocated
//! relationship ids, and every reference inside the block is rewritten to
//! the new id before the block joins the body.

use std::path::Path;

use log::{debug, warn};

use crate::docx::{xml, Package, Relationship};
use crate::error::Result;

/// Relationship types that belong to the package plumbing, not to body
/// content; they are never copied between documents.
const PART_REL_SUFFIXES: [&str; 9] = [
    "/styles",
    "/settings",
    "/webSettings",
    "/fontTable",
    "/theme",
    "/numbering",
    "/footnotes",
    "/endnotes",
    "/customXml",
];

/// Accumulates fragment artifacts into one final document, in append order.
#[derive(Debug)]
pub struct Composer {
    package: Package,
    blocks: Vec<String>,
    docpr_next: u32,
}

impl Composer {
    /// Create a composer with an empty accumulating document.
    pub fn new() -> Self {
        Self {
            package: Package::new(),
            blocks: Vec::new(),
            docpr_next: 1,
        }
    }

    /// Number of body blocks accumulated so far.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Open a fragment artifact and append its content.
    pub fn append_path(&mut self, path: &Path) -> Result<()> {
        let fragment = Package::open(path)?;
        self.append_package(&fragment)
    }

    /// Append all body blocks of a fragment package, in their order.
    pub fn append_package(&mut self, fragment: &Package) -> Result<()> {
        let mut blocks = fragment.body_blocks()?;
        if blocks.is_empty() {
            debug!("fragment contributes no body blocks");
            return Ok(());
        }

        self.copy_references(fragment, &mut blocks)?;
        for block in &mut blocks {
            *block = renumber_docpr(block, &mut self.docpr_next);
        }
        if let Some(styles) = fragment.part("word/styles.xml") {
            self.merge_styles(&String::from_utf8_lossy(styles))?;
        }

        self.blocks.extend(blocks);
        Ok(())
    }

    /// Persist the accumulated document.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.package.set_body_blocks(&self.blocks);
        self.package.save(path)
    }

    /// Deep-copy the relationship targets a set of blocks references into
    /// the accumulating package, rewriting ids in two phases (old id to a
    /// placeholder token, token to the new id) so a fresh id can never be
    /// clobbered by a later rewrite.
    fn copy_references(&mut self, fragment: &Package, blocks: &mut [String]) -> Result<()> {
        let mut pending: Vec<(Relationship, String)> = Vec::new();

        for rel in fragment.relationships()? {
            if is_part_relationship(&rel) {
                continue;
            }
            let quoted_old = format!("\"{}\"", rel.id);
            if !blocks.iter().any(|b| b.contains(&quoted_old)) {
                continue;
            }

            let token = format!("\"__dwrel{}__\"", pending.len());
            for block in blocks.iter_mut() {
                *block = block.replace(&quoted_old, &token);
            }
            pending.push((rel, token));
        }

        for (rel, token) in pending {
            let new_id = if rel.external {
                self.package.add_relationship(&rel.rel_type, &rel.target, true)?
            } else {
                let part_name = part_name_for_target(&rel.target);
                match fragment.part(&part_name) {
                    Some(data) => {
                        let ext = part_name.rsplit('.').next().unwrap_or("bin");
                        self.package.add_image(data, ext)?
                    }
                    None => {
                        warn!("relationship {} targets missing part {part_name}, dropping", rel.id);
                        // Dead reference stays as-is; readers ignore it.
                        rel.id.clone()
                    }
                }
            };

            let quoted_new = format!("\"{new_id}\"");
            for block in blocks.iter_mut() {
                *block = block.replace(&token, &quoted_new);
            }
        }
        Ok(())
    }

    /// Import style definitions the accumulating document does not have
    /// yet, so converted markup keeps its formatting after the merge.
    fn merge_styles(&mut self, fragment_styles: &str) -> Result<()> {
        let master = match self.package.part("word/styles.xml") {
            Some(data) => String::from_utf8_lossy(data).into_owned(),
            None => return Ok(()),
        };

        let mut imported = String::new();
        for child in xml::split_children(fragment_styles, "w:styles")? {
            if !child.starts_with("<w:style ") && !child.starts_with("<w:style>") {
                continue;
            }
            if let Some(id) = style_id(&child) {
                if !master.contains(&format!("w:styleId=\"{id}\"")) && !imported.contains(&format!("w:styleId=\"{id}\"")) {
                    debug!("importing style {id} from fragment");
                    imported.push_str(&child);
                }
            }
        }

        if !imported.is_empty() {
            if let Some(pos) = master.rfind("</w:styles>") {
                let mut merged = master;
                merged.insert_str(pos, &imported);
                self.package.insert_part("word/styles.xml", merged.into_bytes());
            }
        }
        Ok(())
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_part_relationship(rel: &Relationship) -> bool {
    PART_REL_SUFFIXES.iter().any(|s| rel.rel_type.ends_with(s))
}

/// Resolve a document-relative relationship target to a package part name.
fn part_name_for_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("word/{}", target.trim_start_matches("./")),
    }
}

/// Extract the `w:styleId` attribute of a `<w:style>` element.
fn style_id(style_xml: &str) -> Option<&str> {
    let start = style_xml.find("w:styleId=\"")? + "w:styleId=\"".len();
    let end = style_xml[start..].find('"')?;
    Some(&style_xml[start..start + end])
}

/// Give every `wp:docPr` in a block a document-unique id.
fn renumber_docpr(block: &str, next: &mut u32) -> String {
    const MARKER: &str = "<wp:docPr";
    const ID_ATTR: &str = " id=\"";

    let mut out = String::with_capacity(block.len());
    let mut rest = block;
    while let Some(pos) = rest.find(MARKER) {
        let after_marker = pos + MARKER.len();
        out.push_str(&rest[..after_marker]);
        rest = &rest[after_marker..];

        let element_end = rest.find('>').unwrap_or(rest.len());
        if let Some(id_pos) = rest[..element_end].find(ID_ATTR) {
            let value_start = id_pos + ID_ATTR.len();
            if let Some(value_len) = rest[value_start..].find('"') {
                out.push_str(&rest[..value_start]);
                out.push_str(&next.to_string());
                *next += 1;
                rest = &rest[value_start + value_len..];
            }
        }
    }
    out.push_str(rest);
    out
}
