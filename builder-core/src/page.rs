//! Pages and their SEO metadata.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ElementForest;

/// Unique identifier for a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Create a new unique page ID.
    #[must_use]
    pub fn new() -> Self {
        Self(format!("page-{}", Uuid::new_v4().simple()))
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for PageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Search-engine metadata of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    /// Document title.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Meta keywords.
    pub keywords: String,
}

impl Seo {
    /// Merge the fields set in `patch`.
    pub fn merge(&mut self, patch: SeoPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(keywords) = patch.keywords {
            self.keywords = keywords;
        }
    }
}

/// Partial SEO update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoPatch {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New keywords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

/// A named page with its element forest.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Unique identifier.
    pub id: PageId,
    /// Display name.
    pub name: String,
    /// URL path derived from the name.
    pub path: String,
    /// SEO metadata.
    pub seo: Seo,
    elements: ElementForest,
}

impl Page {
    /// Create an empty page with a fresh id.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::with_id(PageId::new(), name)
    }

    /// Create an empty page with the given id. The path is derived from the
    /// name and the SEO title defaults to the name.
    #[must_use]
    pub fn with_id(id: PageId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            path: page_path(name),
            seo: Seo {
                title: name.to_string(),
                ..Seo::default()
            },
            elements: ElementForest::new(),
        }
    }

    /// The page's element forest.
    #[must_use]
    pub fn elements(&self) -> &ElementForest {
        &self.elements
    }

    pub(crate) fn elements_mut(&mut self) -> &mut ElementForest {
        &mut self.elements
    }
}

/// Derive a page path from its name: lowercase, with every whitespace run
/// collapsed into a single `-`.
#[must_use]
pub fn page_path(name: &str) -> String {
    let mut path = String::with_capacity(name.len() + 1);
    path.push('/');
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                path.push('-');
            }
            in_space = true;
        } else {
            path.extend(c.to_lowercase());
            in_space = false;
        }
    }
    path
}
