//! Export: hands a fully rendered view to a file writer.
//!
//! The printable-format renderer is an external collaborator. This module
//! enforces the export precondition, derives the file name, and writes the
//! rendered view where that renderer picks it up.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::document::Document;
use crate::templates::{render, RenderedView, TemplateId};

pub const EMPTY_DOCUMENT_MESSAGE: &str =
    "Please fill in your resume information before downloading.";

const DEFAULT_FILE_STEM: &str = "resume";
const EXPORT_EXTENSION: &str = "pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{}", EMPTY_DOCUMENT_MESSAGE)]
    EmptyDocument,

    #[error("export I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// What gets handed to an `Exporter`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportBundle {
    /// Name of the printable file, e.g. "Jane Doe.pdf".
    pub file_name: String,
    pub view: RenderedView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportReceipt {
    pub file_name: String,
    pub path: String,
    pub bytes: usize,
    pub exported_at: DateTime<Utc>,
}

/// Refuses export of a document with no name, no email and no described role.
pub fn check_export_ready(doc: &Document) -> Result<(), ExportError> {
    let info = &doc.personal_info;
    if info.full_name.is_empty() && info.email.is_empty() && !doc.experiences.any_populated() {
        return Err(ExportError::EmptyDocument);
    }
    Ok(())
}

pub fn export_file_stem(doc: &Document) -> String {
    let name = doc.personal_info.full_name.trim();
    if name.is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        name.to_string()
    }
}

pub fn prepare_export(doc: &Document, template: TemplateId) -> Result<ExportBundle, ExportError> {
    check_export_ready(doc)?;
    Ok(ExportBundle {
        file_name: format!("{}.{}", export_file_stem(doc), EXPORT_EXTENSION),
        view: render(doc, template),
    })
}

/// Writes an export bundle somewhere the printable renderer can read it.
///
/// Carried in `AppState` as `Arc<dyn Exporter>`.
#[async_trait]
pub trait Exporter: Send + Sync {
    async fn export(&self, bundle: &ExportBundle) -> Result<ExportReceipt, ExportError>;
}

/// Writes the bundle as pretty JSON into a directory, one file per export.
pub struct JsonFileExporter {
    dir: PathBuf,
}

impl JsonFileExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl Exporter for JsonFileExporter {
    async fn export(&self, bundle: &ExportBundle) -> Result<ExportReceipt, ExportError> {
        let exported_at = Utc::now();
        let body = serde_json::to_vec_pretty(bundle)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(format!(
            "{}-{}.json",
            path_safe(&bundle.file_name),
            exported_at.format("%Y%m%dT%H%M%S%3f")
        ));
        tokio::fs::write(&path, &body).await?;

        info!(
            file_name = %bundle.file_name,
            path = %path.display(),
            bytes = body.len(),
            "Export written"
        );

        Ok(ExportReceipt {
            file_name: bundle.file_name.clone(),
            path: path.display().to_string(),
            bytes: body.len(),
            exported_at,
        })
    }
}

fn path_safe(file_name: &str) -> String {
    let stem = file_name
        .strip_suffix(&format!(".{EXPORT_EXTENSION}"))
        .unwrap_or(file_name);
    stem.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}
