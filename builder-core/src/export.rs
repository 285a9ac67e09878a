//! Website export.
//!
//! The export is a pretty-printed JSON document of the form
//! `{ "pages": [ { ...page, "exportedAt": "<ISO-8601>" } ] }` saved as
//! `website-export.json`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::{BuilderStore, Page, PageDocument, StoreResult};

/// File name offered for the export download.
pub const EXPORT_FILE_NAME: &str = "website-export.json";

/// One page of the export, stamped with the export time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedPage {
    /// The page itself.
    #[serde(flatten)]
    pub page: PageDocument,
    /// Export time in ISO-8601 with millisecond precision.
    pub exported_at: String,
}

/// The whole export document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    /// Every page in order.
    pub pages: Vec<ExportedPage>,
}

impl ExportDocument {
    /// Build the export for `pages`, stamping each with `now`.
    #[must_use]
    pub fn from_pages(pages: &[Arc<Page>], now: DateTime<Utc>) -> Self {
        let exported_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        Self {
            pages: pages
                .iter()
                .map(|page| ExportedPage {
                    page: PageDocument::from(&**page),
                    exported_at: exported_at.clone(),
                })
                .collect(),
        }
    }

    /// Render as two-space indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write [`EXPORT_FILE_NAME`] into `dir` and return its path.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_to(&self, dir: &Path) -> StoreResult<PathBuf> {
        let path = dir.join(EXPORT_FILE_NAME);
        std::fs::write(&path, self.to_pretty_json()?)?;
        tracing::info!(
            pages = self.pages.len(),
            "Website exported to {}",
            path.display()
        );
        Ok(path)
    }
}

impl BuilderStore {
    /// Build the export document for the current pages.
    #[must_use]
    pub fn export(&self, now: DateTime<Utc>) -> ExportDocument {
        ExportDocument::from_pages(self.pages(), now)
    }
}
