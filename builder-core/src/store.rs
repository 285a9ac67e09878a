//! The builder store: pages, selection, view settings and undo history.
//!
//! The store is owned by a single editor session and mutated through
//! `&mut self`. Pages are held behind `Arc` and edited with
//! [`Arc::make_mut`], so a mutation copies only the page it touches while
//! history snapshots keep sharing the rest.

use std::sync::Arc;

use crate::history::{History, Snapshot, DEFAULT_HISTORY_LIMIT};
use crate::{
    Breakpoint, BuilderDocument, Element, ElementForest, ElementId, ElementNode, ElementPatch,
    MoveTarget, Page, PageDocument, PageId, SeoPatch, StoreError, StoreResult, ViewSettings,
};

/// Id of the page every new store starts with.
pub const INITIAL_PAGE_ID: &str = "page-1";

/// Name of the page every new store starts with.
pub const INITIAL_PAGE_NAME: &str = "Home";

/// Store configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of undo history entries.
    pub history_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// What a successful mutation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A page was appended.
    PageAdded,
    /// A page was removed.
    PageDeleted,
    /// Another page became current.
    CurrentPageChanged,
    /// An element subtree was added.
    ElementAdded,
    /// An element was patched.
    ElementUpdated,
    /// An element subtree was removed.
    ElementDeleted,
    /// An element was moved.
    ElementMoved,
    /// An element subtree was duplicated.
    ElementDuplicated,
    /// The selection changed.
    SelectionChanged,
    /// A page's SEO block changed.
    SeoUpdated,
    /// The theme flag flipped.
    DarkModeToggled,
    /// The preview breakpoint changed.
    BreakpointChanged,
    /// A history step back was applied.
    Undo,
    /// A history step forward was applied.
    Redo,
}

impl ChangeKind {
    /// Whether this change is recorded in undo history.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(
            self,
            Self::PageAdded
                | Self::PageDeleted
                | Self::ElementAdded
                | Self::ElementUpdated
                | Self::ElementDeleted
                | Self::ElementMoved
                | Self::ElementDuplicated
                | Self::SeoUpdated
        )
    }
}

/// Callback invoked after every successful mutation.
pub type OnChangeCallback = Box<dyn Fn(ChangeKind, &BuilderStore)>;

/// The element-tree store of one editor session.
///
/// # Example
///
/// ```
/// use builder_core::{BuilderStore, Element, ElementKind};
///
/// let mut store = BuilderStore::new();
/// let heading = Element::new(ElementKind::Heading).with_content("Welcome");
/// let id = store.add_element(heading, None).unwrap();
///
/// assert_eq!(store.selected_element_id(), Some(&id));
/// assert!(store.undo());
/// assert!(store.current_page().unwrap().elements().is_empty());
/// ```
pub struct BuilderStore {
    pages: Snapshot,
    current_page_id: PageId,
    selected_element_id: Option<ElementId>,
    view: ViewSettings,
    history: History,
    on_change: Option<OnChangeCallback>,
}

impl std::fmt::Debug for BuilderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuilderStore")
            .field("pages", &self.pages.len())
            .field("current_page_id", &self.current_page_id)
            .field("selected_element_id", &self.selected_element_id)
            .field("view", &self.view)
            .field("history_index", &self.history.index())
            .finish_non_exhaustive()
    }
}

impl Default for BuilderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BuilderStore {
    /// Create a store with one empty "Home" page.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create a store with custom configuration.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        let home = Page::with_id(PageId::from(INITIAL_PAGE_ID), INITIAL_PAGE_NAME);
        let pages = vec![Arc::new(home)];
        Self {
            history: History::new(pages.clone(), config.history_limit),
            pages,
            current_page_id: PageId::from(INITIAL_PAGE_ID),
            selected_element_id: None,
            view: ViewSettings::default(),
            on_change: None,
        }
    }

    /// Set the change notification callback.
    pub fn set_on_change<F>(&mut self, callback: F)
    where
        F: Fn(ChangeKind, &BuilderStore) + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// All pages in order.
    #[must_use]
    pub fn pages(&self) -> &[Arc<Page>] {
        &self.pages
    }

    /// Get a page by id.
    #[must_use]
    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages
            .iter()
            .find(|page| page.id.as_str() == id)
            .map(Arc::as_ref)
    }

    /// Id of the page being edited.
    #[must_use]
    pub fn current_page_id(&self) -> &PageId {
        &self.current_page_id
    }

    /// The page being edited.
    #[must_use]
    pub fn current_page(&self) -> Option<&Page> {
        self.page(self.current_page_id.as_str())
    }

    /// The selected element id, if any.
    #[must_use]
    pub fn selected_element_id(&self) -> Option<&ElementId> {
        self.selected_element_id.as_ref()
    }

    /// Look up an element of the current page.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&ElementNode> {
        self.current_page()?.elements().get(id)
    }

    /// Materialize an element of the current page with its subtree.
    #[must_use]
    pub fn element_tree(&self, id: &str) -> Option<Element> {
        self.current_page()?.elements().tree(id)
    }

    /// The selected element, if it still exists.
    #[must_use]
    pub fn selected_element(&self) -> Option<&ElementNode> {
        self.element(self.selected_element_id.as_ref()?.as_str())
    }

    /// Whether the dark theme is on.
    #[must_use]
    pub fn is_dark_mode(&self) -> bool {
        self.view.is_dark_mode
    }

    /// Current preview breakpoint.
    #[must_use]
    pub fn breakpoint(&self) -> Breakpoint {
        self.view.current_breakpoint
    }

    /// Check if undo would change anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo would change anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The undo history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Check whether an element id is used on any page.
    #[must_use]
    pub fn contains_element_anywhere(&self, id: &str) -> bool {
        self.pages.iter().any(|page| page.elements().contains(id))
    }

    /// Serializable snapshot of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> BuilderDocument {
        BuilderDocument {
            pages: self
                .pages
                .iter()
                .map(|page| PageDocument::from(&**page))
                .collect(),
            current_page_id: self.current_page_id.clone(),
            selected_element_id: self.selected_element_id.clone(),
            is_dark_mode: self.view.is_dark_mode,
            current_breakpoint: self.view.current_breakpoint,
            history_index: self.history.index(),
            history_len: self.history.len(),
        }
    }

    // -----------------------------------------------------------------------
    // Pages
    // -----------------------------------------------------------------------

    /// Append a new empty page and make it current.
    pub fn add_page(&mut self, name: &str) -> PageId {
        let page = Page::new(name);
        let id = page.id.clone();
        self.pages.push(Arc::new(page));
        self.current_page_id = id.clone();
        self.selected_element_id = None;
        tracing::debug!(page = %id, name, "Page added");
        self.commit(ChangeKind::PageAdded);
        id
    }

    /// Delete a page. If it was current, the first remaining page becomes
    /// current.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LastPage`] if only one page exists and
    /// [`StoreError::PageNotFound`] if the id is unknown.
    pub fn delete_page(&mut self, id: &str) -> StoreResult<()> {
        if self.pages.len() <= 1 {
            return Err(StoreError::LastPage(id.to_string()));
        }
        let index = self
            .pages
            .iter()
            .position(|page| page.id.as_str() == id)
            .ok_or_else(|| StoreError::PageNotFound(id.to_string()))?;
        self.pages.remove(index);
        if self.current_page_id.as_str() == id {
            self.current_page_id = self.pages[0].id.clone();
            self.selected_element_id = None;
        }
        tracing::debug!(page = id, "Page deleted");
        self.commit(ChangeKind::PageDeleted);
        Ok(())
    }

    /// Switch the current page and clear the selection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PageNotFound`] if the id is unknown; the current
    /// page is left unchanged.
    pub fn set_current_page(&mut self, id: &str) -> StoreResult<()> {
        if self.page(id).is_none() {
            return Err(StoreError::PageNotFound(id.to_string()));
        }
        self.current_page_id = PageId::from(id);
        self.selected_element_id = None;
        self.notify(ChangeKind::CurrentPageChanged);
        Ok(())
    }

    /// Merge fields into a page's SEO block.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PageNotFound`] if the id is unknown.
    pub fn update_page_seo(&mut self, id: &str, seo: SeoPatch) -> StoreResult<()> {
        let page = self
            .pages
            .iter_mut()
            .find(|page| page.id.as_str() == id)
            .ok_or_else(|| StoreError::PageNotFound(id.to_string()))?;
        Arc::make_mut(page).seo.merge(seo);
        self.commit(ChangeKind::SeoUpdated);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Elements
    // -----------------------------------------------------------------------

    /// Add an element (with any children it carries) to the current page,
    /// under `parent` or at the end of the root list, and select it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ElementNotFound`] if the parent is missing and
    /// [`StoreError::DuplicateId`] if an id in the subtree is already used on
    /// any page. Nothing changes on error.
    pub fn add_element(&mut self, element: Element, parent: Option<&str>) -> StoreResult<ElementId> {
        if let Some(taken) = element
            .subtree_ids()
            .into_iter()
            .find(|id| self.contains_element_anywhere(id.as_str()))
        {
            return Err(StoreError::DuplicateId(taken.to_string()));
        }
        let current = self
            .current_page()
            .ok_or_else(|| StoreError::PageNotFound(self.current_page_id.to_string()))?;
        if let Some(parent_id) = parent {
            if !current.elements().contains(parent_id) {
                return Err(StoreError::ElementNotFound(parent_id.to_string()));
            }
        }

        let id = self.edit_current(|forest| forest.insert(element, parent))?;
        self.selected_element_id = Some(id.clone());
        tracing::debug!(element = %id, parent = ?parent, "Element added");
        self.commit(ChangeKind::ElementAdded);
        Ok(id)
    }

    /// Patch an element of the current page. Returns `false` when the patch
    /// leaves the element as it was; nothing is recorded in that case.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ElementNotFound`] if the element is missing.
    pub fn update_element(&mut self, id: &str, updates: ElementPatch) -> StoreResult<bool> {
        let node = self
            .element(id)
            .ok_or_else(|| StoreError::ElementNotFound(id.to_string()))?;
        if node.patched(updates.clone()) == *node {
            tracing::debug!(element = id, "Patch left element unchanged");
            return Ok(false);
        }
        self.edit_current(|forest| forest.update(id, updates))?;
        tracing::debug!(element = id, "Element updated");
        self.commit(ChangeKind::ElementUpdated);
        Ok(true)
    }

    /// Remove an element and its subtree from the current page and clear the
    /// selection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ElementNotFound`] if the element is missing.
    pub fn delete_element(&mut self, id: &str) -> StoreResult<Element> {
        self.require_element(id)?;
        let removed = self.edit_current(|forest| forest.remove(id))?;
        self.selected_element_id = None;
        tracing::debug!(element = id, "Element deleted");
        self.commit(ChangeKind::ElementDeleted);
        Ok(removed)
    }

    /// Move an element to `index` in the target's child list, or the root
    /// list for [`MoveTarget::Root`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ElementNotFound`] if the element or the target is
    /// missing and [`StoreError::InvalidMove`] if the target is inside the
    /// moved subtree. The element stays in place on error.
    pub fn move_element(&mut self, id: &str, target: &MoveTarget, index: usize) -> StoreResult<()> {
        self.require_element(id)?;
        if let MoveTarget::Element(target_id) = target {
            self.require_element(target_id.as_str())?;
        }
        self.edit_current(|forest| forest.move_to(id, target, index))?;
        tracing::debug!(element = id, target = ?target, index, "Element moved");
        self.commit(ChangeKind::ElementMoved);
        Ok(())
    }

    /// Duplicate an element's subtree with fresh ids, right after the
    /// original.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ElementNotFound`] if the element is missing.
    pub fn duplicate_element(&mut self, id: &str) -> StoreResult<ElementId> {
        self.require_element(id)?;
        let copy = self.edit_current(|forest| forest.duplicate(id))?;
        tracing::debug!(element = id, copy = %copy, "Element duplicated");
        self.commit(ChangeKind::ElementDuplicated);
        Ok(copy)
    }

    /// Select an element of the current page, or clear the selection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ElementNotFound`] if the id is not on the current
    /// page; the selection is left unchanged.
    pub fn select_element(&mut self, id: Option<&str>) -> StoreResult<()> {
        if let Some(id) = id {
            self.require_element(id)?;
        }
        self.selected_element_id = id.map(ElementId::from);
        self.notify(ChangeKind::SelectionChanged);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // View settings
    // -----------------------------------------------------------------------

    /// Flip the theme flag.
    pub fn toggle_dark_mode(&mut self) {
        self.view.toggle_dark_mode();
        self.notify(ChangeKind::DarkModeToggled);
    }

    /// Set the preview breakpoint.
    pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
        self.view.current_breakpoint = breakpoint;
        self.notify(ChangeKind::BreakpointChanged);
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Restore the previous snapshot. Returns `false` if there is none.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        self.notify(ChangeKind::Undo);
        true
    }

    /// Restore the next snapshot. Returns `false` if there is none.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        self.notify(ChangeKind::Redo);
        true
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn require_element(&self, id: &str) -> StoreResult<()> {
        if self.element(id).is_some() {
            Ok(())
        } else {
            Err(StoreError::ElementNotFound(id.to_string()))
        }
    }

    /// Run `f` against the current page's forest, copying the page first if
    /// a history snapshot still shares it.
    fn edit_current<T>(
        &mut self,
        f: impl FnOnce(&mut ElementForest) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let current = self.current_page_id.as_str();
        let page = self
            .pages
            .iter_mut()
            .find(|page| page.id.as_str() == current)
            .ok_or_else(|| StoreError::PageNotFound(current.to_string()))?;
        f(Arc::make_mut(page).elements_mut())
    }

    /// Replace the pages with a snapshot and drop references it no longer
    /// contains.
    fn restore(&mut self, snapshot: Snapshot) {
        self.pages = snapshot;
        if self.current_page().is_none() {
            if let Some(first) = self.pages.first() {
                self.current_page_id = first.id.clone();
            }
            self.selected_element_id = None;
        }
        if self.selected_element().is_none() {
            self.selected_element_id = None;
        }
    }

    fn commit(&mut self, change: ChangeKind) {
        if change.is_structural() {
            self.history.record(self.pages.clone());
        }
        self.notify(change);
    }

    fn notify(&self, change: ChangeKind) {
        if let Some(ref callback) = self.on_change {
            callback(change, self);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::{ElementKind, Styles};

    fn text(id: &str) -> Element {
        Element::new(ElementKind::Text).with_id(id).with_content("hi")
    }

    #[test]
    fn test_new_store_defaults() {
        let store = BuilderStore::new();
        assert_eq!(store.pages().len(), 1);
        assert_eq!(store.current_page_id().as_str(), INITIAL_PAGE_ID);
        let home = store.current_page().expect("home page");
        assert_eq!(home.name, "Home");
        assert_eq!(home.path, "/home");
        assert!(store.selected_element_id().is_none());
        assert!(store.is_dark_mode());
        assert_eq!(store.breakpoint(), Breakpoint::Desktop);
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_add_page_becomes_current() {
        let mut store = BuilderStore::new();
        let id = store.add_page("About Us");
        assert_eq!(store.current_page_id(), &id);
        let page = store.page(id.as_str()).expect("page");
        assert_eq!(page.path, "/about-us");
        assert_eq!(page.seo.title, "About Us");
        assert_eq!(store.pages().len(), 2);
    }

    #[test]
    fn test_delete_last_page_is_rejected() {
        let mut store = BuilderStore::new();
        let result = store.delete_page(INITIAL_PAGE_ID);
        assert!(matches!(result, Err(StoreError::LastPage(_))));
        assert_eq!(store.pages().len(), 1);
        assert!(!store.can_undo());
    }

    #[test]
    fn test_delete_current_page_falls_back_to_first() {
        let mut store = BuilderStore::new();
        let about = store.add_page("About");
        store.delete_page(about.as_str()).expect("delete");
        assert_eq!(store.current_page_id().as_str(), INITIAL_PAGE_ID);

        let missing = store.delete_page("page-missing");
        assert!(matches!(missing, Err(StoreError::LastPage(_))));
    }

    #[test]
    fn test_delete_unknown_page() {
        let mut store = BuilderStore::new();
        store.add_page("About");
        let result = store.delete_page("page-missing");
        assert!(matches!(result, Err(StoreError::PageNotFound(_))));
        assert_eq!(store.pages().len(), 2);
    }

    #[test]
    fn test_set_current_page_clears_selection_and_rejects_unknown() {
        let mut store = BuilderStore::new();
        store.add_element(text("el-1"), None).expect("add");
        let about = store.add_page("About");
        store.set_current_page(INITIAL_PAGE_ID).expect("switch");
        assert!(store.selected_element_id().is_none());

        let result = store.set_current_page("page-missing");
        assert!(matches!(result, Err(StoreError::PageNotFound(_))));
        assert_eq!(store.current_page_id().as_str(), INITIAL_PAGE_ID);
        assert_ne!(store.current_page_id(), &about);
    }

    #[test]
    fn test_add_element_to_missing_parent_changes_nothing() {
        let mut store = BuilderStore::new();
        store.add_element(text("el-1"), None).expect("add");
        let result = store.add_element(text("el-2"), Some("ghost"));
        assert!(matches!(result, Err(StoreError::ElementNotFound(_))));
        assert_eq!(store.selected_element_id().map(ElementId::as_str), Some("el-1"));
        assert_eq!(store.history().len(), 2);
    }

    #[test]
    fn test_add_element_rejects_ids_used_on_other_pages() {
        let mut store = BuilderStore::new();
        store.add_element(text("el-1"), None).expect("add");
        store.add_page("About");
        let result = store.add_element(text("el-1"), None);
        assert!(matches!(result, Err(StoreError::DuplicateId(_))));
        assert!(store.current_page().expect("page").elements().is_empty());
    }

    #[test]
    fn test_update_element_merges_styles() {
        let mut store = BuilderStore::new();
        store
            .add_element(
                text("el-1").with_styles(Styles::from_pairs(&[("color", "red"), ("margin", "0")])),
                None,
            )
            .expect("add");
        store
            .update_element(
                "el-1",
                ElementPatch {
                    content: Some("updated".to_string()),
                    styles: Some(Styles::from_pairs(&[("color", "blue")])),
                    ..ElementPatch::default()
                },
            )
            .expect("update");

        let node = store.element("el-1").expect("node");
        assert_eq!(node.content.as_deref(), Some("updated"));
        assert_eq!(node.styles.value("color"), Some("blue"));
        assert_eq!(node.styles.value("margin"), Some("0"));
    }

    #[test]
    fn test_noop_patch_records_nothing() {
        let mut store = BuilderStore::new();
        store
            .add_element(text("t").with_style("color", "red"), None)
            .expect("add");
        let depth = store.history().len();

        assert!(!store.update_element("t", ElementPatch::default()).expect("empty"));
        let same = ElementPatch {
            content: Some("hi".to_string()),
            styles: Some(Styles::from_pairs(&[("color", "red")])),
            ..ElementPatch::default()
        };
        assert!(!store.update_element("t", same).expect("same values"));
        assert_eq!(store.history().len(), depth);

        assert!(store.undo());
        assert!(store.element("t").is_none());
    }

    #[test]
    fn test_root_id_is_reserved() {
        let mut store = BuilderStore::new();
        store.add_element(text("x"), None).expect("add");
        let result = store.add_element(text(crate::ROOT_TARGET), None);
        assert!(matches!(result, Err(StoreError::DuplicateId(_))));
        assert_eq!(store.selected_element_id().map(ElementId::as_str), Some("x"));

        store
            .move_element("x", &MoveTarget::from("root"), 0)
            .expect("move to root list");
        assert!(store.element("x").expect("x").parent.is_none());
    }

    #[test]
    fn test_update_missing_element_records_nothing() {
        let mut store = BuilderStore::new();
        let result = store.update_element("ghost", ElementPatch::content("x"));
        assert!(matches!(result, Err(StoreError::ElementNotFound(_))));
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_select_element_validates_current_page() {
        let mut store = BuilderStore::new();
        store.add_element(text("el-1"), None).expect("add");
        store.select_element(None).expect("clear");
        assert!(store.selected_element_id().is_none());

        let result = store.select_element(Some("ghost"));
        assert!(matches!(result, Err(StoreError::ElementNotFound(_))));
        store.select_element(Some("el-1")).expect("select");
        assert_eq!(store.selected_element().map(|n| n.id.as_str()), Some("el-1"));
    }

    #[test]
    fn test_elements_are_scoped_to_current_page() {
        let mut store = BuilderStore::new();
        store.add_element(text("el-1"), None).expect("add");
        store.add_page("About");
        assert!(store.element("el-1").is_none());
        assert!(matches!(
            store.delete_element("el-1"),
            Err(StoreError::ElementNotFound(_))
        ));
        assert!(store.contains_element_anywhere("el-1"));
    }

    #[test]
    fn test_undo_restores_previous_pages_and_repairs_selection() {
        let mut store = BuilderStore::new();
        store.add_element(text("el-1"), None).expect("add");
        assert!(store.undo());
        assert!(store.current_page().expect("page").elements().is_empty());
        assert!(store.selected_element_id().is_none());

        assert!(store.redo());
        assert!(store.element("el-1").is_some());
        assert!(!store.redo());
    }

    #[test]
    fn test_undo_page_add_restores_current_page() {
        let mut store = BuilderStore::new();
        store.add_page("About");
        assert!(store.undo());
        assert_eq!(store.pages().len(), 1);
        assert_eq!(store.current_page_id().as_str(), INITIAL_PAGE_ID);
    }

    #[test]
    fn test_new_mutation_after_undo_truncates_redo() {
        let mut store = BuilderStore::new();
        store.add_element(text("el-1"), None).expect("add");
        store.add_element(text("el-2"), None).expect("add");
        assert!(store.undo());
        store.add_element(text("el-3"), None).expect("add");
        assert!(!store.can_redo());
        assert!(store.element("el-2").is_none());
        assert!(store.element("el-3").is_some());
    }

    #[test]
    fn test_snapshots_are_not_affected_by_later_edits() {
        let mut store = BuilderStore::new();
        store.add_element(text("el-1"), None).expect("add");
        store
            .update_element("el-1", ElementPatch::content("changed"))
            .expect("update");
        assert!(store.undo());
        assert_eq!(
            store.element("el-1").and_then(|n| n.content.as_deref()),
            Some("hi")
        );
    }

    #[test]
    fn test_view_settings_are_not_recorded() {
        let mut store = BuilderStore::new();
        store.toggle_dark_mode();
        store.set_breakpoint(Breakpoint::Mobile);
        assert!(!store.is_dark_mode());
        assert_eq!(store.breakpoint(), Breakpoint::Mobile);
        assert!(!store.can_undo());
    }

    #[test]
    fn test_on_change_receives_every_mutation() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut store = BuilderStore::new();
        store.set_on_change(move |change, store| {
            sink.borrow_mut()
                .push((change, store.current_page().map_or(0, |p| p.elements().len())));
        });

        store.add_element(text("el-1"), None).expect("add");
        let _ = store.delete_element("ghost");
        store.toggle_dark_mode();
        store.undo();

        assert_eq!(
            *seen.borrow(),
            vec![
                (ChangeKind::ElementAdded, 1),
                (ChangeKind::DarkModeToggled, 1),
                (ChangeKind::Undo, 0),
            ]
        );
    }

    #[test]
    fn test_update_page_seo() {
        let mut store = BuilderStore::new();
        store
            .update_page_seo(
                INITIAL_PAGE_ID,
                SeoPatch {
                    description: Some("Landing page".to_string()),
                    ..SeoPatch::default()
                },
            )
            .expect("seo");
        let seo = &store.current_page().expect("page").seo;
        assert_eq!(seo.title, "Home");
        assert_eq!(seo.description, "Landing page");

        let missing = store.update_page_seo("page-missing", SeoPatch::default());
        assert!(matches!(missing, Err(StoreError::PageNotFound(_))));
    }
}
