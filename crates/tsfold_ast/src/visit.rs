use crate::tree::{NodeId, Tree};

/// Read-only pre-order traversal over a [`Tree`].
pub trait Visitor<'tree>: Sized {
    fn visit_tree(&mut self, tree: &'tree Tree) {
        if let Some(root) = tree.root() {
            self.visit_node(tree, root);
        }
    }

    fn visit_node(&mut self, tree: &'tree Tree, id: NodeId) {
        walk_node(self, tree, id);
    }
}

pub fn walk_node<'tree, V: Visitor<'tree>>(visitor: &mut V, tree: &'tree Tree, id: NodeId) {
    for child in tree.children(id) {
        visitor.visit_node(tree, child);
    }
}
