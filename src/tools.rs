//! External tool shims.
//!
//! Two fragment kinds delegate to external converters: markup fragments go
//! through `pandoc`, and complex HTML is rasterized with `wkhtmltoimage`.
//! Both are invoked as child processes with the source document on stdin.
//! A missing binary maps to [`Error::ToolUnavailable`] so callers can tell
//! a deployment problem apart from bad input.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// Convert markup text to a docx file at `output` using pandoc.
///
/// `format` is a pandoc source format name (`latex`, `html`).
pub fn pandoc_convert(source: &str, format: &str, output: &Path) -> Result<()> {
    debug!("pandoc: converting {format} to {}", output.display());

    let mut child = Command::new("pandoc")
        .arg("--from")
        .arg(format)
        .arg("--to")
        .arg("docx")
        .arg("--output")
        .arg(output)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(e, "pandoc"))?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(source.as_bytes())?;
    }

    let result = child.wait_with_output()?;
    if !result.status.success() {
        return Err(Error::Conversion(String::from_utf8_lossy(&result.stderr).into_owned()));
    }
    Ok(())
}

/// Rasterize an HTML document to a PNG file at `output` using wkhtmltoimage.
pub fn rasterize_html(html: &str, output: &Path) -> Result<()> {
    debug!("wkhtmltoimage: rendering to {}", output.display());

    let mut child = Command::new("wkhtmltoimage")
        .arg("--quiet")
        .arg("--format")
        .arg("png")
        .arg("-")
        .arg(output)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(e, "wkhtmltoimage"))?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(html.as_bytes())?;
    }

    let result = child.wait_with_output()?;
    if !result.status.success() {
        return Err(Error::Rasterize(String::from_utf8_lossy(&result.stderr).into_owned()));
    }
    Ok(())
}

/// Check whether pandoc is installed and runnable.
pub fn pandoc_available() -> bool {
    probe("pandoc")
}

/// Check whether wkhtmltoimage is installed and runnable.
pub fn wkhtmltoimage_available() -> bool {
    probe("wkhtmltoimage")
}

fn probe(binary: &str) -> bool {
    Command::new(binary)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

fn spawn_error(e: std::io::Error, tool: &'static str) -> Error {
    if e.kind() == std::io::ErrorKind::NotFound {
        Error::ToolUnavailable(tool)
    } else {
        Error::Io(e)
    }
}
