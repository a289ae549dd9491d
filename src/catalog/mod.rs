//! Construction and emission of the asset catalog tree.
//!
//! The grouping tree, the rule resolution and the manifest/copy emission are
//! split into focused submodules so the grouping rule and the property merge
//! order can be tested independently of any filesystem state.

mod builder;
mod generation;
mod rules;
mod tree;

pub use builder::AssetCatalog;
pub use generation::{CatalogLog, LogLevel};
pub use tree::{CatalogTree, GroupKind, Node, NodeId};
