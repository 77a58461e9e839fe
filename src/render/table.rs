//! Table fragment renderer.

use std::path::Path;

use log::warn;
use serde_json::{json, Value};

use crate::docx::{xml, Package};
use crate::error::{Error, Result};
use crate::format::eng_string;
use crate::model::{SharedContext, TabularData};
use crate::render::{merged_context, substitute_document};

/// Render tabular data, either as a native bordered table or through a
/// container template. Empty input renders a visible placeholder instead
/// of failing.
#[allow(clippy::too_many_arguments)]
pub(super) fn render(
    data: &TabularData,
    title: Option<&str>,
    eng_format: bool,
    header_label: &str,
    index_label: &str,
    template: Option<&Path>,
    shared: &SharedContext,
    dest: &Path,
) -> Result<()> {
    if data.is_empty() {
        warn!("empty table, rendering placeholder");
        let mut package = Package::new();
        package.set_body_blocks(&[xml::paragraph("[empty table]", None)]);
        return package.save(dest);
    }

    let formatted: Vec<Vec<String>> = data
        .rows
        .iter()
        .map(|row| row.values.iter().map(|v| format_cell(v, eng_format)).collect())
        .collect();

    if let Some(template_path) = template {
        if !template_path.exists() {
            return Err(Error::MissingTemplate(template_path.to_path_buf()));
        }

        let contents: Vec<Value> = data
            .rows
            .iter()
            .zip(&formatted)
            .map(|(row, cells)| json!({ "label": row.label, "cols": cells }))
            .collect();

        let mut local = SharedContext::new();
        local.insert(
            "table".to_string(),
            json!({ "col_labels": data.columns, "tbl_contents": contents }),
        );
        local.insert("title".to_string(), json!(title.unwrap_or_default()));
        local.insert("header_col".to_string(), json!(header_label));
        local.insert("name_index".to_string(), json!(index_label));
        let context = merged_context(shared, local);

        let mut package = Package::open(template_path)?;
        substitute_document(&mut package, &context)?;
        package.save(dest)
    } else {
        let mut blocks = Vec::new();
        if let Some(title) = title {
            blocks.push(xml::paragraph(title, Some("Heading2")));
        }

        let mut header = Vec::with_capacity(data.columns.len() + 1);
        header.push(index_label.to_string());
        header.extend(data.columns.iter().cloned());

        let rows: Vec<Vec<String>> = data
            .rows
            .iter()
            .zip(formatted)
            .map(|(row, cells)| {
                let mut out = Vec::with_capacity(cells.len() + 1);
                out.push(row.label.clone());
                out.extend(cells);
                out
            })
            .collect();

        blocks.push(xml::table(&header, &rows));

        let mut package = Package::new();
        package.set_body_blocks(&blocks);
        package.save(dest)
    }
}

/// Text form of one cell. Missing values render as empty strings; numbers
/// optionally go through engineering notation.
fn format_cell(value: &Value, eng_format: bool) -> String {
    match value {
        Value::Null => String::new(),
        Value::Number(n) => match (eng_format, n.as_f64()) {
            (true, Some(f)) => eng_string(f, 2, false),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
