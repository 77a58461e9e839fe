//! Document builder: the fluent front door of the crate.
//!
//! A [`DocBuilder`] collects fragments in order, renders each one to its own
//! artifact in a temporary workspace, welds the artifacts into one document,
//! and reports per-fragment outcomes. A fragment that cannot be rendered or
//! composed is skipped, logged, and recorded in the [`BuildReport`]; only a
//! failure to persist the final document fails the build itself.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::compose::Composer;
use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::model::{Fragment, MarkupKind, SharedContext, TabularData};
use crate::render;
use crate::workspace::Workspace;

/// Builds a document from an ordered list of content fragments.
///
/// # Examples
///
/// ```no_run
/// use docweld::DocBuilder;
///
/// let mut builder = DocBuilder::new();
/// builder
///     .add_title("Measurement Report", 1)
///     .add_text("All channels within tolerance.", None)
///     .add_image("plots/channel1.png", None, Some("Channel 1"), None);
/// let report = builder.build("report.docx")?;
/// assert_eq!(report.skipped(), 0);
/// # Ok::<(), docweld::Error>(())
/// ```
#[derive(Debug)]
pub struct DocBuilder {
    config: BuildConfig,
    fragments: Vec<Fragment>,
    context: SharedContext,
    workspace: Workspace,
}

impl DocBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BuildConfig::default())
    }

    /// Create a builder with an explicit configuration.
    pub fn with_config(config: BuildConfig) -> Self {
        let workspace = Workspace::new(config.temp_prefix.clone());
        Self {
            config,
            fragments: Vec::new(),
            context: SharedContext::new(),
            workspace,
        }
    }

    /// Append an already-constructed fragment.
    pub fn add(&mut self, fragment: Fragment) -> &mut Self {
        self.fragments.push(fragment);
        self
    }

    /// Append a text paragraph, optionally with a named paragraph style.
    pub fn add_text(&mut self, text: impl Into<String>, style: Option<&str>) -> &mut Self {
        self.add(Fragment::Text {
            text: text.into(),
            style: style.map(str::to_string),
        })
    }

    /// Append a heading. Level 0 is the document title style; levels 1-6
    /// map to the matching heading style (out-of-range levels are clamped).
    pub fn add_title(&mut self, text: impl Into<String>, level: u8) -> &mut Self {
        let style = match level {
            0 => "Title".to_string(),
            n => format!("Heading{}", n.min(6)),
        };
        self.add_text(text, Some(&style))
    }

    /// Append an image fragment. `width_mm` defaults to the configured
    /// image width; height keeps the source aspect ratio. With a container
    /// template, the image is substituted into it instead of being embedded
    /// directly.
    pub fn add_image(
        &mut self,
        path: impl Into<PathBuf>,
        width_mm: Option<u32>,
        caption: Option<&str>,
        template: Option<&Path>,
    ) -> &mut Self {
        self.add(Fragment::Image {
            path: path.into(),
            width_mm: width_mm.unwrap_or(self.config.default_image_width_mm),
            caption: caption.map(str::to_string),
            template: template.map(Path::to_path_buf),
        })
    }

    /// Append a table fragment. Column labels come from the data; the
    /// header and index labels come from the configuration. With a
    /// container template, the table data is substituted into it instead
    /// of rendering a native table.
    pub fn add_table(
        &mut self,
        data: TabularData,
        title: Option<&str>,
        eng_format: bool,
        template: Option<&Path>,
    ) -> &mut Self {
        self.add(Fragment::Table {
            data,
            title: title.map(str::to_string),
            eng_format,
            header_label: self.config.default_table_header.clone(),
            index_label: self.config.default_index_label.clone(),
            template: template.map(Path::to_path_buf),
        })
    }

    /// Append LaTeX source to be converted by the external converter.
    pub fn add_latex(&mut self, source: impl Into<String>) -> &mut Self {
        self.add(Fragment::Markup {
            source: source.into(),
            kind: MarkupKind::Latex,
        })
    }

    /// Append HTML source to be converted by the external converter.
    pub fn add_html(&mut self, source: impl Into<String>) -> &mut Self {
        self.add(Fragment::Markup {
            source: source.into(),
            kind: MarkupKind::Html,
        })
    }

    /// Append HTML to be rasterized to a bitmap and embedded like an image.
    pub fn add_raster_html(
        &mut self,
        html: impl Into<String>,
        width_mm: Option<u32>,
        title: Option<&str>,
        template: Option<&Path>,
    ) -> &mut Self {
        self.add(Fragment::RasterHtml {
            html: html.into(),
            width_mm: width_mm.unwrap_or(self.config.default_image_width_mm),
            title: title.map(str::to_string),
            template: template.map(Path::to_path_buf),
        })
    }

    /// Append a raw container template populated from `context` merged over
    /// the shared context.
    pub fn add_template(&mut self, path: impl Into<PathBuf>, context: SharedContext) -> &mut Self {
        self.add(Fragment::Template {
            path: path.into(),
            context,
        })
    }

    /// The shared substitution context. Values set here are visible to
    /// every template fragment; fragment-local values win on collisions.
    pub fn context_mut(&mut self) -> &mut SharedContext {
        &mut self.context
    }

    /// Number of fragments appended so far.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Materialize the temporary workspace up front. Optional; the first
    /// build does this on demand.
    pub fn init(&mut self) -> Result<()> {
        self.workspace.init()
    }

    /// Remove the temporary workspace and all fragment artifacts.
    /// Idempotent; also runs when the builder is dropped.
    pub fn cleanup(&mut self) {
        self.workspace.cleanup();
    }

    /// Render every fragment in append order, weld the artifacts into one
    /// document, and persist it at `output`.
    ///
    /// Fragments that fail to render or compose are omitted from the
    /// document and reported as [`OutcomeStatus::Skipped`] with the reason;
    /// the build keeps going. With no fragments this is a no-op that writes
    /// nothing. Returns `Err` only when the final document cannot be
    /// persisted.
    pub fn build(&mut self, output: impl AsRef<Path>) -> Result<BuildReport> {
        let output = output.as_ref();
        let mut report = BuildReport::default();

        if self.fragments.is_empty() {
            warn!("no fragments to build, skipping {}", output.display());
            return Ok(report);
        }

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut composer = Composer::new();
        for (index, fragment) in self.fragments.iter().enumerate() {
            let kind = fragment.kind();
            let status = match self.workspace.next_path() {
                Err(e) => {
                    error!("fragment {index} ({kind}): workspace failure: {e}");
                    OutcomeStatus::Skipped { reason: e.to_string() }
                }
                Ok(dest) => match render::render_fragment(fragment, &dest, &self.context) {
                    Err(e) => {
                        error!("fragment {index} ({kind}): render failed: {e}");
                        OutcomeStatus::Skipped { reason: e.to_string() }
                    }
                    Ok(()) if !dest.exists() => {
                        error!("fragment {index} ({kind}): no artifact produced");
                        OutcomeStatus::Skipped {
                            reason: "renderer produced no artifact".to_string(),
                        }
                    }
                    Ok(()) => match composer.append_path(&dest) {
                        Ok(()) => OutcomeStatus::Composed,
                        Err(e) => {
                            error!("fragment {index} ({kind}): compose failed: {e}");
                            OutcomeStatus::Skipped { reason: e.to_string() }
                        }
                    },
                },
            };
            report.outcomes.push(FragmentOutcome { index, kind, status });
        }

        composer
            .save(output)
            .map_err(|e| Error::save(output, e))?;
        info!(
            "built {} ({} composed, {} skipped)",
            output.display(),
            report.composed(),
            report.skipped()
        );
        Ok(report)
    }
}

impl Default for DocBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-fragment outcomes of one [`DocBuilder::build`] call, in append order.
#[derive(Debug, Default)]
pub struct BuildReport {
    outcomes: Vec<FragmentOutcome>,
}

impl BuildReport {
    /// Outcomes in fragment append order.
    pub fn outcomes(&self) -> &[FragmentOutcome] {
        &self.outcomes
    }

    /// Number of fragments that made it into the document.
    pub fn composed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Composed)
            .count()
    }

    /// Number of fragments omitted from the document.
    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.composed()
    }

    /// True when no fragments were processed at all.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// What happened to one fragment during a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentOutcome {
    /// Position of the fragment in append order.
    pub index: usize,
    /// Fragment kind tag, as reported by [`Fragment::kind`].
    pub kind: &'static str,
    /// Whether the fragment was composed or skipped.
    pub status: OutcomeStatus,
}

/// Composed into the document, or skipped with the failure reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// The fragment's content is part of the final document.
    Composed,
    /// The fragment was omitted; `reason` says why.
    Skipped {
        /// Human-readable failure description.
        reason: String,
    },
}
