//! Hierarchical text menus.
//!
//! A [`Menu`] owns a tree of [`MenuNode`]s addressed by paths of child
//! indices. Rendering walks the visible nodes and writes a numbered listing to
//! a [`WrapSink`].

mod node;
mod path;
mod tree;
mod wrap;

pub use node::{MenuContents, MenuNode, MenuSettings, DEFAULT_MAX_LINE_LENGTH};
pub use path::{common_ancestor, path_string, PathIndex, MAX_CHILDREN};
pub use tree::{Menu, MenuError};
pub use wrap::{Layout, TextWrapper, WrapSink};
