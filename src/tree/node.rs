use crate::functions::{KindSpec, NodeKind};
use crate::types::{NodeId, NodeType, ParentSlot};

/// A node stored in an [`ExpressionTree`](super::ExpressionTree).
///
/// Links are handles into the owning arena: children are owned through the
/// arena, `parent` is a back-reference only.
#[derive(Debug, Clone)]
pub struct ExpressionNode {
    kind: NodeKind,
    parent: Option<NodeId>,
    parent_slot: ParentSlot,
    children: [Option<NodeId>; 3],
}

impl ExpressionNode {
    pub(crate) fn standalone(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            parent_slot: ParentSlot::None,
            children: [None; 3],
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    pub fn spec(&self) -> KindSpec {
        self.kind.spec()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn return_type(&self) -> NodeType {
        self.spec().return_type
    }

    pub fn child_type(&self) -> NodeType {
        self.spec().child_type
    }

    /// Number of child slots this kind declares, regardless of how many are filled.
    pub fn declared_arity(&self) -> usize {
        self.spec().arity
    }

    /// Number of child slots currently filled
    pub fn attached_child_count(&self) -> usize {
        self.children.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_terminal(&self) -> bool {
        self.declared_arity() == 0
    }

    /// Every declared slot is filled.
    pub fn is_complete(&self) -> bool {
        self.attached_child_count() == self.declared_arity()
    }

    pub fn is_time_series(&self) -> bool {
        self.spec().is_time_series
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn parent_slot(&self) -> ParentSlot {
        self.parent_slot
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn child(&self, slot: ParentSlot) -> Option<NodeId> {
        slot.index().and_then(|i| self.children[i])
    }

    /// Attached children in Left, Center, Right order
    pub fn children(&self) -> impl Iterator<Item = (ParentSlot, NodeId)> + '_ {
        ParentSlot::CHILD_SLOTS
            .into_iter()
            .zip(self.children.iter())
            .filter_map(|(slot, child)| child.map(|id| (slot, id)))
    }

    /// Copy of this node's own state with no links.
    pub fn clone_basics(&self) -> ExpressionNode {
        ExpressionNode::standalone(self.kind.clone())
    }

    pub(crate) fn set_child(&mut self, slot: ParentSlot, child: Option<NodeId>) {
        if let Some(i) = slot.index() {
            self.children[i] = child;
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>, slot: ParentSlot) {
        self.parent = parent;
        self.parent_slot = slot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standalone_node_has_no_links() {
        let node = ExpressionNode::standalone(NodeKind::Add);
        assert!(node.is_root());
        assert_eq!(node.parent_slot(), ParentSlot::None);
        assert_eq!(node.declared_arity(), 2);
        assert_eq!(node.attached_child_count(), 0);
        assert!(!node.is_complete());
    }

    #[test]
    fn test_terminal_is_complete() {
        let node = ExpressionNode::standalone(NodeKind::Constant(1.0));
        assert!(node.is_terminal());
        assert!(node.is_complete());
        assert_eq!(node.return_type(), NodeType::Numeric);
    }

    #[test]
    fn test_comparison_types() {
        let node = ExpressionNode::standalone(NodeKind::LessThan);
        assert_eq!(node.return_type(), NodeType::Boolean);
        assert_eq!(node.child_type(), NodeType::Numeric);
    }
}
