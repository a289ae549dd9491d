//! Grouping tree of image set groups and their variants.
//!
//! The tree is an arena of nodes: parents own their children through an
//! ordered list of indices, and the upward link is a plain index used only to
//! reconstruct a node's path from the root. Nodes are created on demand
//! during insertion and live until the whole tree is dropped.

use std::path::PathBuf;

use crate::image::ImageProperties;

/// Index of a node within the catalog tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// Role of a directory node within the generated catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupKind {
    /// Ordinary folder preserved from the source layout.
    #[default]
    Directory,
    /// Generated `.imageset` group merging the variants of one image.
    ImageSet,
    /// Generated `.appiconset` group.
    AppIcon,
}

/// One node of the grouping tree.
#[derive(Debug)]
pub struct Node {
    /// Node name, unique among siblings under case-insensitive comparison.
    pub name: String,
    /// Role of the node when it is a directory.
    pub kind: GroupKind,
    /// Source file backing a leaf variant; `None` marks a directory node.
    pub source_path: Option<PathBuf>,
    /// Variant metadata attached to leaf nodes.
    pub properties: Option<ImageProperties>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(name: &str, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            kind: GroupKind::default(),
            source_path: None,
            properties: None,
            parent,
            children: Vec::new(),
        }
    }

    /// A node without a backing source file acts as a directory.
    pub fn is_directory(&self) -> bool {
        self.source_path.is_none()
    }
}

/// Arena-backed grouping tree rooted at the catalog destination.
#[derive(Debug)]
pub struct CatalogTree {
    nodes: Vec<Node>,
}

impl CatalogTree {
    /// Create a tree containing only the root node.
    pub fn new(root_name: &str) -> Self {
        Self {
            nodes: vec![Node::new(root_name, None)],
        }
    }

    /// The root node's id.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Mutably borrow a node.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// The ordered children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Find the child with the given name, compared case-insensitively,
    /// creating it when absent. Insertion order among siblings is preserved.
    pub fn child_named(&mut self, parent: NodeId, name: &str) -> NodeId {
        let existing = self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].name.eq_ignore_ascii_case(name));

        if let Some(child) = existing {
            return child;
        }

        let child = NodeId(self.nodes.len());
        self.nodes.push(Node::new(name, Some(parent)));
        self.nodes[parent.0].children.push(child);
        child
    }

    /// Path components from the root (excluded) down to this node.
    pub fn path_components(&self, id: NodeId) -> Vec<&str> {
        let mut components = Vec::new();
        let mut current = Some(id);

        while let Some(node_id) = current {
            let node = &self.nodes[node_id.0];
            if node.parent.is_none() {
                break;
            }
            components.push(node.name.as_str());
            current = node.parent;
        }

        components.reverse();
        components
    }
}
