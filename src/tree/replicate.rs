use super::arena::ExpressionTree;
use super::node::ExpressionNode;
use crate::error::Result;
use crate::types::{NodeId, ParentSlot};
use std::collections::HashMap;

/// Unlinked copy of one subtree node plus where it hangs in the copy
struct Blueprint {
    node: ExpressionNode,
    /// Position of the parent within the blueprint list, and the slot used
    parent: Option<(usize, ParentSlot)>,
}

impl ExpressionTree {
    /// Deep copy of the subtree at `id` inside this arena.
    ///
    /// The replica's root has no parent; mutating either tree never affects
    /// the other.
    pub fn replicate(&mut self, id: NodeId) -> Result<NodeId> {
        let blueprint = self.blueprint(id)?;
        let root = self.graft(blueprint)?;
        log::debug!("Replicated {} as {}", id, root);
        Ok(root)
    }

    /// Deep copy of the subtree at `id` into another arena.
    pub fn replicate_into(&self, id: NodeId, target: &mut ExpressionTree) -> Result<NodeId> {
        target.graft(self.blueprint(id)?)
    }

    /// Deep copy of the subtree at `id` into a fresh arena of its own.
    pub fn replicate_standalone(&self, id: NodeId) -> Result<(ExpressionTree, NodeId)> {
        let mut target = ExpressionTree::new();
        let root = self.replicate_into(id, &mut target)?;
        Ok((target, root))
    }

    fn blueprint(&self, id: NodeId) -> Result<Vec<Blueprint>> {
        let order = self.preorder(id)?;
        let mut positions: HashMap<NodeId, usize> = HashMap::with_capacity(order.len());
        let mut blueprint = Vec::with_capacity(order.len());
        for (position, node_id) in order.iter().enumerate() {
            let node = self.node(*node_id)?;
            // Pre-order places every parent before its children; the subtree
            // root's own parent is outside the copy and never in `positions`.
            let parent = node
                .parent()
                .and_then(|parent_id| positions.get(&parent_id))
                .map(|p| (*p, node.parent_slot()));
            positions.insert(*node_id, position);
            blueprint.push(Blueprint {
                node: node.clone_basics(),
                parent,
            });
        }
        Ok(blueprint)
    }

    fn graft(&mut self, blueprint: Vec<Blueprint>) -> Result<NodeId> {
        let mut created: Vec<NodeId> = Vec::with_capacity(blueprint.len());
        for entry in blueprint {
            let id = self.insert_node(entry.node);
            if let Some((position, slot)) = entry.parent {
                self.attach(created[position], slot, id)?;
            }
            created.push(id);
        }
        // An empty blueprint cannot come from `preorder`.
        Ok(created[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::NodeKind;

    #[test]
    fn test_replica_root_is_detached() {
        let mut tree = ExpressionTree::new();
        let neg = tree.create(NodeKind::Negate);
        let abs = tree.create(NodeKind::Abs);
        let leaf = tree.create(NodeKind::Constant(2.0));
        tree.add_center(neg, abs).unwrap();
        tree.add_center(abs, leaf).unwrap();

        let copy = tree.replicate(abs).unwrap();
        assert!(tree.node(copy).unwrap().is_root());
        assert_eq!(tree.subtree_size(copy).unwrap(), 2);
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.node(abs).unwrap().parent(), Some(neg));
    }
}
