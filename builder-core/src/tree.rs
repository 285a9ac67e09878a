//! Per-page element forest.
//!
//! Elements are stored flat in an arena keyed by id. Each node records its
//! parent and the ordered ids of its children, and the forest keeps the
//! ordered list of root ids. Structural edits are pairs of arena updates
//! (detach from one list, attach to another), so a node can never end up
//! with two parents.

use std::collections::{HashMap, HashSet};

use crate::{
    Attributes, Element, ElementId, ElementKind, ElementPatch, MoveTarget, StoreError,
    StoreResult, Styles, ROOT_TARGET,
};

/// An element as stored in the forest.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    /// Unique identifier.
    pub id: ElementId,
    /// Component type.
    pub kind: ElementKind,
    /// Text content.
    pub content: Option<String>,
    /// Style properties.
    pub styles: Styles,
    /// HTML attributes.
    pub attributes: Option<Attributes>,
    /// Raw CSS.
    pub custom_css: Option<String>,
    /// Raw script.
    pub custom_js: Option<String>,
    /// Parent element, `None` for page roots.
    pub parent: Option<ElementId>,
    /// Ordered child ids.
    pub children: Vec<ElementId>,
}

impl ElementNode {
    fn detached(element: &Element, parent: Option<ElementId>) -> Self {
        Self {
            id: element.id.clone(),
            kind: element.kind,
            content: element.content.clone(),
            styles: element.styles.clone(),
            attributes: element.attributes.clone(),
            custom_css: element.custom_css.clone(),
            custom_js: element.custom_js.clone(),
            parent,
            children: element.children.iter().map(|c| c.id.clone()).collect(),
        }
    }

    /// A copy of this node with `patch` merged in. Structure (id, parent,
    /// children) is never touched by a patch.
    #[must_use]
    pub fn patched(&self, patch: ElementPatch) -> Self {
        let mut node = self.clone();
        node.apply(patch);
        node
    }

    fn to_element(&self, children: Vec<Element>) -> Element {
        Element {
            id: self.id.clone(),
            kind: self.kind,
            content: self.content.clone(),
            styles: self.styles.clone(),
            children,
            attributes: self.attributes.clone(),
            custom_css: self.custom_css.clone(),
            custom_js: self.custom_js.clone(),
        }
    }

    fn apply(&mut self, patch: ElementPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(content) = patch.content {
            self.content = Some(content);
        }
        if let Some(styles) = patch.styles {
            self.styles.merge(styles);
        }
        if let Some(attributes) = patch.attributes {
            self.attributes
                .get_or_insert_with(Attributes::default)
                .merge(attributes);
        }
        if let Some(css) = patch.custom_css {
            self.custom_css = Some(css);
        }
        if let Some(js) = patch.custom_js {
            self.custom_js = Some(js);
        }
    }
}

/// The ordered element tree of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementForest {
    nodes: HashMap<ElementId, ElementNode>,
    roots: Vec<ElementId>,
}

impl ElementForest {
    /// Create an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of elements at any depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the forest has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check if an element with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get a node by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ElementNode> {
        self.nodes.get(id)
    }

    /// Ordered root ids.
    #[must_use]
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// Ordered children of `parent`, or the roots for `None`.
    #[must_use]
    pub fn children_of(&self, parent: Option<&str>) -> Option<&[ElementId]> {
        match parent {
            None => Some(&self.roots),
            Some(id) => self.nodes.get(id).map(|node| node.children.as_slice()),
        }
    }

    /// Depth-first pre-order walk over every node.
    #[must_use]
    pub fn iter(&self) -> Preorder<'_> {
        Preorder {
            forest: self,
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Check whether `ancestor` is `id` itself or one of its ancestors.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: &str, id: &str) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self
                .nodes
                .get(current)
                .and_then(|node| node.parent.as_ref().map(ElementId::as_str));
        }
        false
    }

    /// Materialize the subtree rooted at `id`.
    ///
    /// Built bottom-up from an explicit stack, so the depth of the tree is
    /// bounded by memory rather than by the call stack.
    #[must_use]
    pub fn tree(&self, id: &str) -> Option<Element> {
        let root = self.nodes.get(id)?;
        let mut stack = vec![Pending::new(root)];
        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            if let Some(child_id) = node.children.get(frame.next) {
                frame.next += 1;
                if let Some(child) = self.nodes.get(child_id.as_str()) {
                    stack.push(Pending::new(child));
                }
                continue;
            }
            let done = stack.pop()?;
            let element = done.node.to_element(done.children);
            match stack.last_mut() {
                Some(parent) => parent.children.push(element),
                None => return Some(element),
            }
        }
        None
    }

    /// Ids of `id` and all its descendants in pre-order. Empty if `id` is
    /// unknown.
    #[must_use]
    pub fn subtree_ids(&self, id: &str) -> Vec<ElementId> {
        let mut ids = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(current) {
                ids.push(node.id.clone());
                stack.extend(node.children.iter().rev().map(ElementId::as_str));
            }
        }
        ids
    }

    /// Materialize every root tree in order.
    #[must_use]
    pub fn trees(&self) -> Vec<Element> {
        self.roots
            .iter()
            .filter_map(|id| self.tree(id.as_str()))
            .collect()
    }

    /// Append `element` (with its subtree) to `parent`'s children, or to the
    /// roots when `parent` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ElementNotFound`] if the parent does not exist and
    /// [`StoreError::DuplicateId`] if any id in the subtree is already used or
    /// is the reserved [`ROOT_TARGET`] id.
    pub fn insert(&mut self, element: Element, parent: Option<&str>) -> StoreResult<ElementId> {
        let index = self.children_of(parent).map_or(0, <[ElementId]>::len);
        self.insert_at(element, parent, index)
    }

    /// Insert `element` at `index` in `parent`'s child list (clamped).
    ///
    /// # Errors
    ///
    /// Same as [`ElementForest::insert`].
    pub fn insert_at(
        &mut self,
        element: Element,
        parent: Option<&str>,
        index: usize,
    ) -> StoreResult<ElementId> {
        if let Some(parent_id) = parent {
            if !self.nodes.contains_key(parent_id) {
                return Err(StoreError::ElementNotFound(parent_id.to_string()));
            }
        }
        self.check_ids_free(&element)?;

        let id = element.id.clone();
        let parent_id = parent.map(ElementId::from);
        self.flatten(element, parent_id);
        let list = self.list_mut(parent);
        let index = index.min(list.len());
        list.insert(index, id.clone());
        Ok(id)
    }

    /// Remove the element with this id and its whole subtree.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ElementNotFound`] if no such element exists.
    pub fn remove(&mut self, id: &str) -> StoreResult<Element> {
        let removed = self
            .tree(id)
            .ok_or_else(|| StoreError::ElementNotFound(id.to_string()))?;
        let gone = self.subtree_ids(id);
        self.detach(id);
        for gone_id in gone {
            self.nodes.remove(&gone_id);
        }
        Ok(removed)
    }

    /// Apply a partial update to one element.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ElementNotFound`] if no such element exists.
    pub fn update(&mut self, id: &str, patch: ElementPatch) -> StoreResult<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| StoreError::ElementNotFound(id.to_string()))?;
        node.apply(patch);
        Ok(())
    }

    /// Move an element under `target` at `index`. The index addresses the
    /// target list after the element has been taken out of its old place and
    /// is clamped to the list length.
    ///
    /// The target is validated before anything is detached, so a failed move
    /// leaves the forest unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ElementNotFound`] if the element or the target is
    /// missing, and [`StoreError::InvalidMove`] if the target lies inside the
    /// moved subtree.
    pub fn move_to(&mut self, id: &str, target: &MoveTarget, index: usize) -> StoreResult<()> {
        if !self.nodes.contains_key(id) {
            return Err(StoreError::ElementNotFound(id.to_string()));
        }
        let new_parent = match target {
            MoveTarget::Root => None,
            MoveTarget::Element(target_id) => {
                if !self.nodes.contains_key(target_id.as_str()) {
                    return Err(StoreError::ElementNotFound(target_id.to_string()));
                }
                if self.is_ancestor_or_self(id, target_id.as_str()) {
                    return Err(StoreError::InvalidMove(format!(
                        "{id} cannot be moved into its own subtree ({target_id})"
                    )));
                }
                Some(target_id.clone())
            }
        };

        self.detach(id);
        let list = self.list_mut(new_parent.as_ref().map(ElementId::as_str));
        let index = index.min(list.len());
        list.insert(index, ElementId::from(id));
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = new_parent;
        }
        Ok(())
    }

    /// Deep-clone the subtree at `id` with fresh ids and insert the clone
    /// right after the original.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ElementNotFound`] if no such element exists.
    pub fn duplicate(&mut self, id: &str) -> StoreResult<ElementId> {
        let parent = self
            .nodes
            .get(id)
            .ok_or_else(|| StoreError::ElementNotFound(id.to_string()))?
            .parent
            .clone();
        let position = self
            .children_of(parent.as_ref().map(ElementId::as_str))
            .and_then(|list| list.iter().position(|sibling| sibling.as_str() == id))
            .unwrap_or(0);

        let copy = self.copy_subtree(id, parent.clone());
        let list = self.list_mut(parent.as_ref().map(ElementId::as_str));
        let index = (position + 1).min(list.len());
        list.insert(index, copy.clone());
        Ok(copy)
    }

    /// Copy the nodes under `id` into the arena with fresh ids and return the
    /// id of the copied root. The copy is not yet linked into any list.
    fn copy_subtree(&mut self, id: &str, parent: Option<ElementId>) -> ElementId {
        let root = ElementId::new();
        let mut stack = vec![(ElementId::from(id), root.clone(), parent)];
        while let Some((source, target, parent)) = stack.pop() {
            let Some(original) = self.nodes.get(source.as_str()) else {
                continue;
            };
            let mut node = original.clone();
            node.id = target.clone();
            node.parent = parent;
            node.children = original.children.iter().map(|_| ElementId::new()).collect();
            for (child, fresh) in original.children.iter().zip(&node.children) {
                stack.push((child.clone(), fresh.clone(), Some(target.clone())));
            }
            self.nodes.insert(target, node);
        }
        root
    }

    fn check_ids_free(&self, element: &Element) -> StoreResult<()> {
        let mut seen = HashSet::new();
        for id in element.subtree_ids() {
            if id.as_str() == ROOT_TARGET
                || self.nodes.contains_key(&id)
                || !seen.insert(id.clone())
            {
                return Err(StoreError::DuplicateId(id.to_string()));
            }
        }
        Ok(())
    }

    fn flatten(&mut self, element: Element, parent: Option<ElementId>) {
        let mut stack = vec![(element, parent)];
        while let Some((mut element, parent)) = stack.pop() {
            let node = ElementNode::detached(&element, parent);
            let id = node.id.clone();
            for child in std::mem::take(&mut element.children) {
                stack.push((child, Some(id.clone())));
            }
            self.nodes.insert(id, node);
        }
    }

    /// Take `id` out of its parent's child list (or the roots).
    fn detach(&mut self, id: &str) {
        let parent = self.nodes.get(id).and_then(|node| node.parent.clone());
        self.list_mut(parent.as_ref().map(ElementId::as_str))
            .retain(|sibling| sibling.as_str() != id);
    }

    fn list_mut(&mut self, parent: Option<&str>) -> &mut Vec<ElementId> {
        match parent.and_then(|id| self.nodes.get_mut(id)) {
            Some(node) => &mut node.children,
            None => &mut self.roots,
        }
    }
}

impl<'a> IntoIterator for &'a ElementForest {
    type Item = &'a ElementNode;
    type IntoIter = Preorder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A node whose children are still being materialized.
struct Pending<'a> {
    node: &'a ElementNode,
    next: usize,
    children: Vec<Element>,
}

impl<'a> Pending<'a> {
    fn new(node: &'a ElementNode) -> Self {
        Self {
            node,
            next: 0,
            children: Vec::with_capacity(node.children.len()),
        }
    }
}

/// Depth-first pre-order iterator over an [`ElementForest`].
#[derive(Debug)]
pub struct Preorder<'a> {
    forest: &'a ElementForest,
    stack: Vec<&'a ElementId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a ElementNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(node) = self.forest.nodes.get(id.as_str()) {
                self.stack.extend(node.children.iter().rev());
                return Some(node);
            }
        }
        None
    }
}
