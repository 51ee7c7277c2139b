use super::node::ExpressionNode;
use crate::error::{GpError, Result};
use crate::functions::NodeKind;
use crate::types::{NodeId, ParentSlot};

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<ExpressionNode>,
}

/// Arena owning every node of one or more expression trees.
///
/// Nodes are addressed by generation-checked [`NodeId`] handles, so a handle
/// to a destroyed node is reported as stale instead of silently aliasing
/// whatever reuses its slot. All linkage changes go through the arena and
/// update both ends of a parent/child link together.
#[derive(Debug, Clone, Default)]
pub struct ExpressionTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl ExpressionTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    /// Construct a standalone node (no parent, no children).
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        self.insert_node(ExpressionNode::standalone(kind))
    }

    pub(crate) fn insert_node(&mut self, node: ExpressionNode) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId::new(index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId::new(index, 0)
    }

    pub fn node(&self, id: NodeId) -> Result<&ExpressionNode> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(GpError::StaleNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut ExpressionNode> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(GpError::StaleNode(id))
    }

    pub fn parent(&self, id: NodeId) -> Result<NodeId> {
        self.node(id)?.parent().ok_or(GpError::NoParent(id))
    }

    pub fn child(&self, id: NodeId, slot: ParentSlot) -> Result<NodeId> {
        self.node(id)?
            .child(slot)
            .ok_or(GpError::MissingChild { parent: id, slot })
    }

    pub fn add_left(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.attach(parent, ParentSlot::Left, child)
    }

    pub fn add_center(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.attach(parent, ParentSlot::Center, child)
    }

    pub fn add_right(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.attach(parent, ParentSlot::Right, child)
    }

    /// Attach the standalone node `child` into `slot` of `parent`.
    ///
    /// Nothing is modified when any precondition fails.
    pub fn attach(&mut self, parent: NodeId, slot: ParentSlot, child: NodeId) -> Result<()> {
        self.check_attach(parent, slot, child)?;

        self.node_mut(parent)?.set_child(slot, Some(child));
        self.node_mut(child)?.set_parent(Some(parent), slot);
        log::trace!("Attached {} to {:?} of {}", child, slot, parent);
        Ok(())
    }

    fn check_attach(&self, parent: NodeId, slot: ParentSlot, child: NodeId) -> Result<()> {
        let p = self.node(parent)?;
        let c = self.node(child)?;

        if !slot.is_valid_for(p.declared_arity()) {
            return Err(GpError::InvalidSlot {
                kind: p.name(),
                slot,
                arity: p.declared_arity(),
            });
        }
        if p.child(slot).is_some() {
            return Err(GpError::SlotOccupied { parent, slot });
        }
        if c.return_type() != p.child_type() {
            return Err(GpError::TypeMismatch {
                expected: p.child_type(),
                actual: c.return_type(),
            });
        }
        if c.parent().is_some() {
            return Err(GpError::AlreadyAttached(child));
        }
        // `child` is a root here, so a cycle exists iff it roots `parent`.
        if self.root_of(parent)? == child {
            return Err(GpError::Cycle { parent, child });
        }
        Ok(())
    }

    /// Unlink `id` from its parent; it becomes the root of its own tree.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        let node = self.node(id)?;
        let parent = node.parent().ok_or(GpError::NoParent(id))?;
        let slot = node.parent_slot();

        self.node_mut(parent)?.set_child(slot, None);
        self.node_mut(id)?.set_parent(None, ParentSlot::None);
        log::trace!("Detached {} from {:?} of {}", id, slot, parent);
        Ok(())
    }

    /// Put the standalone node `new` where `old` sits and return `old` detached.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> Result<NodeId> {
        let parent = self.parent(old)?;
        let slot = self.node(old)?.parent_slot();
        let p = self.node(parent)?;
        let n = self.node(new)?;

        if n.return_type() != p.child_type() {
            return Err(GpError::TypeMismatch {
                expected: p.child_type(),
                actual: n.return_type(),
            });
        }
        if n.parent().is_some() {
            return Err(GpError::AlreadyAttached(new));
        }
        if self.root_of(parent)? == new {
            return Err(GpError::Cycle { parent, child: new });
        }

        self.detach(old)?;
        self.attach(parent, slot, new)?;
        Ok(old)
    }

    /// Destroy `id` and every node it owns, detaching it first if needed.
    ///
    /// Returns the number of destroyed nodes.
    pub fn remove(&mut self, id: NodeId) -> Result<usize> {
        if self.node(id)?.parent().is_some() {
            self.detach(id)?;
        }
        let doomed = self.preorder(id)?;
        for node_id in &doomed {
            let slot = &mut self.slots[node_id.index()];
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(node_id.index);
        }
        self.live -= doomed.len();
        log::debug!("Removed subtree {} ({} nodes)", id, doomed.len());
        Ok(doomed.len())
    }

    /// Topmost ancestor of `id` (itself when it is a root)
    pub fn root_of(&self, id: NodeId) -> Result<NodeId> {
        let mut current = id;
        while let Some(parent) = self.node(current)?.parent() {
            current = parent;
        }
        Ok(current)
    }

    /// Subtree of `id` in pre-order: self, then Left, Center, Right.
    pub fn preorder(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node(current)?;
            order.push(current);
            let children: Vec<NodeId> = node.children().map(|(_, c)| c).collect();
            stack.extend(children.into_iter().rev());
        }
        Ok(order)
    }

    pub fn subtree_size(&self, id: NodeId) -> Result<usize> {
        Ok(self.preorder(id)?.len())
    }

    /// Edges on the longest downward path from `id` (0 for a leaf)
    pub fn height(&self, id: NodeId) -> Result<usize> {
        let mut deepest = 0;
        let mut stack = vec![(id, 0)];
        while let Some((current, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(self.node(current)?.children().map(|(_, c)| (c, depth + 1)));
        }
        Ok(deepest)
    }

    /// Edges between `id` and its root
    pub fn level(&self, id: NodeId) -> Result<usize> {
        let mut level = 0;
        let mut current = id;
        while let Some(parent) = self.node(current)?.parent() {
            level += 1;
            current = parent;
        }
        Ok(level)
    }

    /// Every subtree node has all of its declared slots filled.
    pub fn is_complete(&self, id: NodeId) -> Result<bool> {
        for node_id in self.preorder(id)? {
            if !self.node(node_id)?.is_complete() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Live nodes without a parent
    pub fn roots(&self) -> Vec<NodeId> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.node
                    .as_ref()
                    .filter(|node| node.is_root())
                    .map(|_| NodeId::new(index as u32, slot.generation))
            })
            .collect()
    }
}
