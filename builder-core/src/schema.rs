//! Serialized representations shared by the export, the wasm binding and
//! the CLI.

use serde::{Deserialize, Serialize};

use crate::{Breakpoint, Element, ElementId, Page, PageId, Seo};

/// Document form of a page, with its element forest materialized as nested
/// trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    /// Page identifier.
    pub id: PageId,
    /// Display name.
    pub name: String,
    /// URL path.
    pub path: String,
    /// Root elements with their subtrees.
    pub elements: Vec<Element>,
    /// SEO metadata.
    pub seo: Seo,
}

impl From<&Page> for PageDocument {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id.clone(),
            name: page.name.clone(),
            path: page.path.clone(),
            elements: page.elements().trees(),
            seo: page.seo.clone(),
        }
    }
}

/// Snapshot of the whole editor state handed to the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderDocument {
    /// All pages in order.
    pub pages: Vec<PageDocument>,
    /// The page being edited.
    pub current_page_id: PageId,
    /// The selected element, if any.
    pub selected_element_id: Option<ElementId>,
    /// Theme flag.
    pub is_dark_mode: bool,
    /// Preview breakpoint.
    pub current_breakpoint: Breakpoint,
    /// History cursor position.
    pub history_index: usize,
    /// Number of history entries.
    pub history_len: usize,
}
