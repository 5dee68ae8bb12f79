//! Comment tag trees.
//!
//! Leading comments of a definition are parsed into a forest of [`Node`]s.
//! Lines beginning with `@directive` become [`Tag`]s when the directive is
//! registered in a [`Tags`] registry and its remainder has the shape the
//! registered [`TagKind`] requires; all other lines are kept as [`Text`].
//! Lines indented one level deeper than a tag become that tag's children.

pub mod node;
pub mod tags;

pub use node::{to_lines, walk, Node, Tag, TagBody, Text};
pub use tags::{valid_indentation, LineCursor, TagKind, Tags, INDENTATION};
