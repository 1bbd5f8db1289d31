use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tsfold_span::Span;
use tsfold_span::id::{Id, IdTag};

use crate::node::{NodeKind, SlotMut};

#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub struct NodeIdTag;

impl IdTag for NodeIdTag {
    const NAME: &'static str = "NodeId";
}

pub type NodeId = Id<NodeIdTag>;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    pub kind: NodeKind,
    /// Back-reference to the node whose slot holds this one. Not an ownership edge.
    pub parent: Option<NodeId>,
    /// Position in the original source. Nodes created by a pass have none.
    pub span: Option<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceError {
    /// The node has no parent to replace it in.
    Detached { node: NodeId },
    /// The node's parent does not hold it in any of its slots.
    SlotNotFound { node: NodeId, parent: NodeId },
}

impl ReplaceError {
    pub fn node(self) -> NodeId {
        match self {
            ReplaceError::Detached { node } | ReplaceError::SlotNotFound { node, .. } => node,
        }
    }
}

impl std::fmt::Display for ReplaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplaceError::Detached { node } => write!(f, "{node} is not attached to a parent"),
            ReplaceError::SlotNotFound { node, parent } => {
                write!(f, "{node} does not occupy a slot of its parent {parent}")
            }
        }
    }
}

impl std::error::Error for ReplaceError {}

enum Vacated {
    Removed,
    /// The slot cannot be left empty.
    Required,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a node and points the parent link of each of its children at it.
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        let children = kind.children();

        self.nodes.push(Node {
            kind,
            parent: None,
            span: None,
        });

        for child in children {
            self.set_parent(child, Some(id));
        }

        id
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// # Panics
    ///
    /// Panics if `id` was not allocated by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// # Panics
    ///
    /// Panics if `id` was not allocated by this tree.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.node(id).span
    }

    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.node_mut(id).parent = parent;
    }

    pub fn set_span(&mut self, id: NodeId, span: Span) {
        self.node_mut(id).span = Some(span);
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.kind(id).children()
    }

    /// Whether `id` is the name being declared by its parent declaration.
    pub fn is_declaration_name(&self, id: NodeId) -> bool {
        self.parent(id).is_some_and(|parent| {
            matches!(self.kind(parent), NodeKind::VariableDeclaration { name, .. } if *name == id)
        })
    }

    /// Installs `new` into the slot of `old`'s parent that currently holds `old`.
    ///
    /// On success `new` is re-parented to that parent and `old` is detached. On failure the tree
    /// is left untouched.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> Result<(), ReplaceError> {
        let parent = self
            .parent(old)
            .ok_or(ReplaceError::Detached { node: old })?;

        let installed = self
            .node_mut(parent)
            .kind
            .slots_mut()
            .into_iter()
            .any(|slot| match slot {
                SlotMut::Single(id) if *id == old => {
                    *id = new;
                    true
                }
                SlotMut::Optional(id) if *id == Some(old) => {
                    *id = Some(new);
                    true
                }
                SlotMut::Sequence(ids) => match ids.iter().position(|id| *id == old) {
                    Some(index) => {
                        ids[index] = new;
                        true
                    }
                    None => false,
                },
                _ => false,
            });

        if !installed {
            return Err(ReplaceError::SlotNotFound { node: old, parent });
        }

        debug!("Replaced {old} with {new} in {parent}");

        self.set_parent(new, Some(parent));
        self.set_parent(old, None);

        Ok(())
    }

    /// Removes `old` from its parent.
    ///
    /// Sequence slots drop the element, optional slots are cleared. A slot that must always hold
    /// a node receives a fresh empty statement instead, which is returned.
    pub fn remove(&mut self, old: NodeId) -> Result<Option<NodeId>, ReplaceError> {
        let parent = self
            .parent(old)
            .ok_or(ReplaceError::Detached { node: old })?;

        let vacated = self
            .node_mut(parent)
            .kind
            .slots_mut()
            .into_iter()
            .find_map(|slot| match slot {
                SlotMut::Single(id) if *id == old => Some(Vacated::Required),
                SlotMut::Optional(id) if *id == Some(old) => {
                    *id = None;
                    Some(Vacated::Removed)
                }
                SlotMut::Sequence(ids) => {
                    let index = ids.iter().position(|id| *id == old)?;
                    ids.remove(index);
                    Some(Vacated::Removed)
                }
                _ => None,
            });

        match vacated {
            Some(Vacated::Removed) => {
                debug!("Removed {old} from {parent}");

                self.set_parent(old, None);
                Ok(None)
            }
            Some(Vacated::Required) => {
                let empty = self.add_node(NodeKind::EmptyStatement);
                self.replace(old, empty)?;
                Ok(Some(empty))
            }
            None => Err(ReplaceError::SlotNotFound { node: old, parent }),
        }
    }
}
