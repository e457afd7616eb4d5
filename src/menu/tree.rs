use std::fmt;

use thiserror::Error;
use tracing::{debug, trace};

use super::node::{MenuContents, MenuNode, MenuSettings};
use super::path::{self, path_string, PathIndex, MAX_CHILDREN};
use super::wrap::WrapSink;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("no menu entry at path '{path}'")]
    NotFound { path: String },
    #[error("menu entry '{path}' already holds the maximum of {limit} children")]
    CapacityExceeded { path: String, limit: usize },
}

/// A menu tree rooted at a permanently hidden node.
///
/// The caller owns the current path; the menu only tracks which nodes are
/// visible and renders them.
#[derive(Debug, Clone)]
pub struct Menu {
    root: MenuNode,
    expand_target: bool,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    pub fn new() -> Self {
        let mut root = MenuNode::new(MenuContents::default(), MenuSettings::default());
        root.hide();
        Self {
            root,
            expand_target: false,
        }
    }

    pub fn root(&self) -> &MenuNode {
        &self.root
    }

    /// When set, rendering a path also reveals the children of the node it
    /// addresses, i.e. the entries that can be picked next.
    pub fn set_expand_target(&mut self, expand: bool) {
        self.expand_target = expand;
    }

    pub fn expand_target(&self) -> bool {
        self.expand_target
    }

    pub fn node_at(&self, path: &[PathIndex]) -> Option<&MenuNode> {
        self.root.node_at(path)
    }

    pub fn node_at_mut(&mut self, path: &[PathIndex]) -> Option<&mut MenuNode> {
        self.root.node_at_mut(path)
    }

    pub fn is_valid_path(&self, path: &[PathIndex]) -> bool {
        self.node_at(path).is_some()
    }

    /// Appends a new entry below the node at `parent`.
    pub fn insert_child(
        &mut self,
        parent: &[PathIndex],
        contents: MenuContents,
        settings: MenuSettings,
    ) -> Result<&mut MenuNode, MenuError> {
        let node = self.root.node_at_mut(parent).ok_or_else(|| MenuError::NotFound {
            path: path_string(parent),
        })?;
        if node.child_count() >= MAX_CHILDREN {
            return Err(MenuError::CapacityExceeded {
                path: path_string(parent),
                limit: MAX_CHILDREN,
            });
        }
        trace!(parent = %path_string(parent), brief = %contents.brief, "insert menu entry");
        Ok(node.push_child(MenuNode::new(contents, settings)))
    }

    pub fn common_ancestor<'a>(
        from: &[PathIndex],
        to: &'a [PathIndex],
    ) -> (&'a [PathIndex], &'a [PathIndex]) {
        path::common_ancestor(from, to)
    }

    /// Resets visibility to show `target` and renders the whole menu.
    pub fn render_path(&mut self, sink: &mut dyn WrapSink, target: &[PathIndex]) -> fmt::Result {
        debug!(path = %path_string(target), "render menu");
        self.root.hide_subtree();
        self.root.unhide_to_path(target);
        self.expand(target);
        self.root.render_briefs(sink)
    }

    /// Moves the visible state from `current` to `target` and renders.
    ///
    /// Only the subtree below the common ancestor of both paths is reset.
    /// If either the ancestor or the target does not resolve, nothing changes
    /// and nothing is written.
    pub fn navigate_to(
        &mut self,
        sink: &mut dyn WrapSink,
        current: &[PathIndex],
        target: &[PathIndex],
    ) -> fmt::Result {
        let (common, remainder) = path::common_ancestor(current, target);
        let Some(ancestor) = self.root.node_at_mut(common) else {
            debug!(common = %path_string(common), "navigation ancestor missing");
            return Ok(());
        };
        if ancestor.node_at(remainder).is_none() {
            debug!(to = %path_string(target), "navigation target missing");
            return Ok(());
        }

        debug!(
            from = %path_string(current),
            to = %path_string(target),
            common = %path_string(common),
            "navigate menu"
        );
        ancestor.hide_descendants();
        ancestor.unhide_to_path(remainder);
        self.expand(target);
        self.root.render_briefs(sink)
    }

    /// Writes the detail view of the entry at `path`. The root has none.
    pub fn render_details(&self, sink: &mut dyn WrapSink, path: &[PathIndex]) -> fmt::Result {
        if path.is_empty() {
            return Ok(());
        }
        match self.node_at(path) {
            Some(node) => node.render_details(sink),
            None => Ok(()),
        }
    }

    fn expand(&mut self, target: &[PathIndex]) {
        if !self.expand_target {
            return;
        }
        if let Some(node) = self.root.node_at_mut(target) {
            node.unhide_direct_children();
        }
    }
}
