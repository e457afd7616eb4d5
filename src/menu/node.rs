use std::fmt;

use super::path::PathIndex;
use super::wrap::{Layout, WrapSink};

pub const DEFAULT_MAX_LINE_LENGTH: u16 = 80;

/// Display settings carried by every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSettings {
    /// Spaces between the bullet label and the brief.
    pub space_after_bullet: u16,
    /// Left indent of the bullet line.
    pub brief_indent: u16,
    /// Left indent of the detail text.
    pub details_indent: u16,
    pub max_line_length: u16,
    pub hidden: bool,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            space_after_bullet: 1,
            brief_indent: 0,
            details_indent: 0,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            hidden: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuContents {
    pub brief: String,
    pub details: String,
}

impl MenuContents {
    pub fn new(brief: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            brief: brief.into(),
            details: details.into(),
        }
    }

    pub fn brief(brief: impl Into<String>) -> Self {
        Self::new(brief, String::new())
    }
}

/// One entry of the menu tree. Children are owned and never shared.
#[derive(Debug, Clone, Default)]
pub struct MenuNode {
    pub contents: MenuContents,
    pub settings: MenuSettings,
    children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn new(contents: MenuContents, settings: MenuSettings) -> Self {
        Self {
            contents,
            settings,
            children: Vec::new(),
        }
    }

    pub fn children(&self) -> &[MenuNode] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_hidden(&self) -> bool {
        self.settings.hidden
    }

    pub(crate) fn push_child(&mut self, child: MenuNode) -> &mut MenuNode {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn hide(&mut self) {
        self.settings.hidden = true;
    }

    pub fn unhide(&mut self) {
        self.settings.hidden = false;
    }

    pub fn hide_direct_children(&mut self) {
        for child in &mut self.children {
            child.hide();
        }
    }

    pub fn unhide_direct_children(&mut self) {
        for child in &mut self.children {
            child.unhide();
        }
    }

    /// Hides every node below this one, leaving this node's own flag alone.
    pub fn hide_descendants(&mut self) {
        for child in &mut self.children {
            child.hide_subtree();
        }
    }

    /// Hides this node and everything below it.
    pub fn hide_subtree(&mut self) {
        self.hide();
        self.hide_descendants();
    }

    /// Follows `path` down from this node. An empty path yields `self`.
    pub fn node_at(&self, path: &[PathIndex]) -> Option<&MenuNode> {
        path.iter()
            .try_fold(self, |node, &i| node.children.get(usize::from(i)))
    }

    pub fn node_at_mut(&mut self, path: &[PathIndex]) -> Option<&mut MenuNode> {
        path.iter()
            .try_fold(self, |node, &i| node.children.get_mut(usize::from(i)))
    }

    /// Reveals the siblings at every level along `path`.
    ///
    /// Each step unhides all direct children of the current node and moves
    /// into the one named by the next index. An empty path changes nothing.
    /// An out-of-range index stops the walk after revealing that level.
    pub fn unhide_to_path(&mut self, path: &[PathIndex]) {
        let Some((&head, rest)) = path.split_first() else {
            return;
        };
        self.unhide_direct_children();
        if let Some(child) = self.children.get_mut(usize::from(head)) {
            child.unhide_to_path(rest);
        }
    }

    /// Writes the visible children as a numbered listing, depth first.
    ///
    /// Bullets are positional: a hidden child still takes its number, so the
    /// label always matches the index a user types to select the entry. The
    /// gap after each bullet is this node's `space_after_bullet`; indent and
    /// width come from the child.
    pub fn render_briefs(&self, sink: &mut dyn WrapSink) -> fmt::Result {
        let gap = usize::from(self.settings.space_after_bullet);
        for (n, child) in self.children.iter().enumerate() {
            if child.is_hidden() {
                continue;
            }
            child.render_bullet(sink, n + 1, gap)?;
            child.render_briefs(sink)?;
        }
        Ok(())
    }

    fn render_bullet(&self, sink: &mut dyn WrapSink, number: usize, gap: usize) -> fmt::Result {
        let s = &self.settings;
        let indent = usize::from(s.brief_indent);
        let bullet = format!("{number}.{:gap$}", "");

        sink.write_str(&" ".repeat(indent))?;
        sink.write_str(&bullet)?;
        sink.write_wrapped(
            &self.contents.brief,
            Layout {
                indent: indent + bullet.len(),
                max_width: usize::from(s.max_line_length),
            },
        )?;
        sink.end_line()
    }

    /// Writes the brief as a heading followed by the detail text.
    pub fn render_details(&self, sink: &mut dyn WrapSink) -> fmt::Result {
        let s = &self.settings;
        let max_width = usize::from(s.max_line_length);
        let indent = usize::from(s.details_indent);

        sink.write_wrapped(&self.contents.brief, Layout { indent: 0, max_width })?;
        sink.end_line()?;
        if self.contents.details.is_empty() {
            return Ok(());
        }
        sink.write_str(&" ".repeat(indent))?;
        sink.write_wrapped(&self.contents.details, Layout { indent, max_width })?;
        sink.end_line()
    }
}
