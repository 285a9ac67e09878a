//! Serializable store commands.
//!
//! Every store operation has a [`Command`] variant. View layers that talk to
//! the store through messages (the wasm binding, CLI scripts) send commands
//! and call [`BuilderStore::dispatch`], which never reports an error back:
//! a rejected command is logged and leaves the state unchanged.

use serde::{Deserialize, Serialize};

use crate::{
    palette, Breakpoint, BuilderStore, Element, ElementId, ElementKind, ElementPatch, MoveTarget,
    PageId, SeoPatch, StoreResult,
};

/// One store operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    /// Append a page and make it current.
    AddPage {
        /// Page name.
        name: String,
    },
    /// Delete a page.
    DeletePage {
        /// Page to delete.
        id: PageId,
    },
    /// Switch the current page.
    SetCurrentPage {
        /// Page to switch to.
        id: PageId,
    },
    /// Add an element subtree.
    AddElement {
        /// Element to add.
        element: Element,
        /// Parent element; root list when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_id: Option<ElementId>,
    },
    /// Add the palette default for a kind (a canvas drop).
    AddFromPalette {
        /// Dropped kind.
        #[serde(rename = "type")]
        kind: ElementKind,
        /// Drop target; root list when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_id: Option<ElementId>,
    },
    /// Patch an element.
    UpdateElement {
        /// Element to patch.
        id: ElementId,
        /// Fields to merge.
        updates: ElementPatch,
    },
    /// Delete an element subtree.
    DeleteElement {
        /// Element to delete.
        id: ElementId,
    },
    /// Move an element.
    MoveElement {
        /// Element to move.
        id: ElementId,
        /// New parent, or `"root"`.
        target_parent_id: MoveTarget,
        /// Position in the new parent's child list.
        index: usize,
    },
    /// Duplicate an element subtree.
    DuplicateElement {
        /// Element to duplicate.
        id: ElementId,
    },
    /// Select an element or clear the selection.
    SelectElement {
        /// Element to select; `null` clears.
        id: Option<ElementId>,
    },
    /// Merge fields into a page's SEO block.
    #[serde(rename = "updatePageSEO")]
    UpdatePageSeo {
        /// Page to update.
        id: PageId,
        /// Fields to merge.
        seo: SeoPatch,
    },
    /// Flip the theme.
    ToggleDarkMode,
    /// Change the preview breakpoint.
    SetBreakpoint {
        /// New breakpoint.
        breakpoint: Breakpoint,
    },
    /// Step back in history.
    Undo,
    /// Step forward in history.
    Redo,
}

impl Command {
    /// Operation name as it appears on the wire.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddPage { .. } => "addPage",
            Self::DeletePage { .. } => "deletePage",
            Self::SetCurrentPage { .. } => "setCurrentPage",
            Self::AddElement { .. } => "addElement",
            Self::AddFromPalette { .. } => "addFromPalette",
            Self::UpdateElement { .. } => "updateElement",
            Self::DeleteElement { .. } => "deleteElement",
            Self::MoveElement { .. } => "moveElement",
            Self::DuplicateElement { .. } => "duplicateElement",
            Self::SelectElement { .. } => "selectElement",
            Self::UpdatePageSeo { .. } => "updatePageSEO",
            Self::ToggleDarkMode => "toggleDarkMode",
            Self::SetBreakpoint { .. } => "setBreakpoint",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}

/// Result of a successfully applied command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The state changed.
    Applied,
    /// A page was created.
    PageCreated(PageId),
    /// An element was created (added or duplicated).
    ElementCreated(ElementId),
    /// Nothing to do (undo/redo at the end of history, or a patch that
    /// changes nothing).
    Unchanged,
}

impl BuilderStore {
    /// Execute one command.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying store operation; the state is
    /// unchanged in that case.
    pub fn apply(&mut self, command: Command) -> StoreResult<Outcome> {
        let outcome = match command {
            Command::AddPage { name } => Outcome::PageCreated(self.add_page(&name)),
            Command::DeletePage { id } => {
                self.delete_page(id.as_str())?;
                Outcome::Applied
            }
            Command::SetCurrentPage { id } => {
                self.set_current_page(id.as_str())?;
                Outcome::Applied
            }
            Command::AddElement { element, parent_id } => Outcome::ElementCreated(
                self.add_element(element, parent_id.as_ref().map(ElementId::as_str))?,
            ),
            Command::AddFromPalette { kind, parent_id } => Outcome::ElementCreated(
                self.add_element(
                    palette::new_element(kind),
                    parent_id.as_ref().map(ElementId::as_str),
                )?,
            ),
            Command::UpdateElement { id, updates } => {
                if self.update_element(id.as_str(), updates)? {
                    Outcome::Applied
                } else {
                    Outcome::Unchanged
                }
            }
            Command::DeleteElement { id } => {
                self.delete_element(id.as_str())?;
                Outcome::Applied
            }
            Command::MoveElement {
                id,
                target_parent_id,
                index,
            } => {
                self.move_element(id.as_str(), &target_parent_id, index)?;
                Outcome::Applied
            }
            Command::DuplicateElement { id } => {
                Outcome::ElementCreated(self.duplicate_element(id.as_str())?)
            }
            Command::SelectElement { id } => {
                self.select_element(id.as_ref().map(ElementId::as_str))?;
                Outcome::Applied
            }
            Command::UpdatePageSeo { id, seo } => {
                self.update_page_seo(id.as_str(), seo)?;
                Outcome::Applied
            }
            Command::ToggleDarkMode => {
                self.toggle_dark_mode();
                Outcome::Applied
            }
            Command::SetBreakpoint { breakpoint } => {
                self.set_breakpoint(breakpoint);
                Outcome::Applied
            }
            Command::Undo => {
                if self.undo() {
                    Outcome::Applied
                } else {
                    Outcome::Unchanged
                }
            }
            Command::Redo => {
                if self.redo() {
                    Outcome::Applied
                } else {
                    Outcome::Unchanged
                }
            }
        };
        Ok(outcome)
    }

    /// Execute one command on behalf of the view layer. Errors are logged
    /// and swallowed; the return value tells whether the state changed.
    pub fn dispatch(&mut self, command: Command) -> bool {
        let name = command.name();
        match self.apply(command) {
            Ok(Outcome::Unchanged) => false,
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(op = name, "Command rejected: {e}");
                false
            }
        }
    }
}
