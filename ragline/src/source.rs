//! Upstream document-source boundary.
//!
//! The fetcher itself is an external collaborator; this module fixes only
//! the shape of what it must supply (raw structured records) and how
//! those records become [`Document`]s. [`fetch_documents`] maps an empty
//! fetch result to [`RagError::NotFound`] per the ingest contract.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::document::Document;
use crate::error::{RagError, Result};

/// A raw structured record as supplied by an upstream source.
pub type SourceRecord = Value;

/// Placeholder used when a record lacks a configured field.
const NOT_SPECIFIED: &str = "Not specified";

/// Field values longer than this are cut before formatting.
const VALUE_CAP: usize = 1000;

/// A capability that fetches raw records from an upstream source.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Opaque label naming this source, attached to produced documents.
    fn label(&self) -> &str;

    /// Fetch raw records matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ExternalService`] if the upstream is
    /// unreachable or returns malformed data.
    async fn fetch(&self, query: &str) -> Result<Vec<SourceRecord>>;
}

/// One labeled section extracted from a record.
///
/// `path` addresses a record field, with `.` descending into nested
/// objects (for example `"profile.display_name"`).
#[derive(Debug, Clone)]
pub struct SectionSpec {
    /// Heading the value is rendered under.
    pub label: String,
    /// Dotted field path inside the record.
    pub path: String,
}

impl SectionSpec {
    /// Create a section spec.
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self { label: label.into(), path: path.into() }
    }
}

/// Formats raw records into readable document text, section by section.
///
/// Each configured section renders as `"Label: value"` where the value is
/// the first string of the addressed field (fields are commonly
/// string arrays upstream), trimmed and capped at 1000 characters, or
/// `"Not specified"` when absent. Sections are joined as paragraphs.
#[derive(Debug, Clone)]
pub struct RecordFormatter {
    sections: Vec<SectionSpec>,
}

impl RecordFormatter {
    /// Create a formatter rendering the given sections in order.
    pub fn new(sections: Vec<SectionSpec>) -> Self {
        Self { sections }
    }

    /// Render one record as readable text.
    pub fn format(&self, record: &SourceRecord) -> String {
        self.sections
            .iter()
            .map(|section| format!("{}: {}", section.label, extract_first(record, &section.path)))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Convert fetched records into [`Document`]s labeled with the
    /// source's label.
    ///
    /// Records that are not JSON objects are skipped with a warning, the
    /// way a malformed upstream row should not poison the whole batch.
    pub fn documents(&self, source_label: &str, records: &[SourceRecord]) -> Vec<Document> {
        let mut documents = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if !record.is_object() {
                warn!(index = i, "skipping non-object source record");
                continue;
            }
            documents.push(Document::new(
                format!("{source_label}-{i}"),
                self.format(record),
                source_label,
            ));
        }
        documents
    }
}

/// Fetch from `source` and format the result into documents.
///
/// # Errors
///
/// Returns [`RagError::NotFound`] when the upstream yields zero records
/// for `query`, and propagates [`RagError::ExternalService`] from the
/// fetch itself.
pub async fn fetch_documents(
    source: &dyn DocumentSource,
    formatter: &RecordFormatter,
    query: &str,
) -> Result<Vec<Document>> {
    let records = source.fetch(query).await?;

    if records.is_empty() {
        return Err(RagError::NotFound(format!(
            "no records found for '{query}' in source '{}'",
            source.label()
        )));
    }

    let documents = formatter.documents(source.label(), &records);
    info!(record_count = records.len(), document_count = documents.len(), "source fetch complete");
    Ok(documents)
}

/// Extract the first string value at a dotted path, trimmed and capped.
fn extract_first(record: &Value, path: &str) -> String {
    let mut current = record;
    for key in path.split('.') {
        match current.get(key) {
            Some(next) => current = next,
            None => return NOT_SPECIFIED.to_string(),
        }
    }

    let value = match current {
        Value::Array(items) => items.first().and_then(Value::as_str),
        Value::String(s) => Some(s.as_str()),
        _ => None,
    };

    match value {
        Some(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                NOT_SPECIFIED.to_string()
            } else {
                trimmed.chars().take(VALUE_CAP).collect()
            }
        }
        None => NOT_SPECIFIED.to_string(),
    }
}
