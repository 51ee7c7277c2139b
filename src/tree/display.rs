use super::arena::ExpressionTree;
use crate::error::Result;
use crate::types::NodeId;
use std::fmt::{self, Write};

enum Step {
    Node(NodeId),
    Space,
    Close,
}

impl ExpressionTree {
    /// Textual dump of the subtree at `id`.
    ///
    /// Pre-order, children in Left, Center, Right order with empty slots
    /// skipped. A terminal renders as its label; an operator renders as
    /// `(label child...)` with single spaces, e.g. `(Add 3 4)`.
    pub fn tree_to_string(&self, id: NodeId) -> Result<String> {
        let mut out = String::new();
        self.write_tree(id, &mut out)?;
        Ok(out)
    }

    /// Write the dump of the subtree at `id` into `out`.
    pub fn write_tree<W: Write>(&self, id: NodeId, out: &mut W) -> Result<()> {
        let mut stack = vec![Step::Node(id)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Space => out.write_char(' ')?,
                Step::Close => out.write_char(')')?,
                Step::Node(current) => {
                    let node = self.node(current)?;
                    if node.is_terminal() {
                        write!(out, "{}", node.kind())?;
                        continue;
                    }
                    write!(out, "({}", node.kind())?;
                    stack.push(Step::Close);
                    let children: Vec<NodeId> = node.children().map(|(_, c)| c).collect();
                    for child in children.into_iter().rev() {
                        stack.push(Step::Node(child));
                        stack.push(Step::Space);
                    }
                }
            }
        }
        Ok(())
    }

    /// `Display` adapter over [`ExpressionTree::write_tree`] for log lines.
    pub fn display(&self, id: NodeId) -> TreeDisplay<'_> {
        TreeDisplay { tree: self, id }
    }
}

pub struct TreeDisplay<'a> {
    tree: &'a ExpressionTree,
    id: NodeId,
}

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Every node below a live root is live.
        if !self.tree.contains(self.id) {
            return write!(f, "<stale {}>", self.id);
        }
        self.tree.write_tree(self.id, f).map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::NodeKind;

    #[test]
    fn test_nested_dump() {
        let mut tree = ExpressionTree::new();
        let and = tree.create(NodeKind::And);
        let not = tree.create(NodeKind::Not);
        let t = tree.create(NodeKind::BoolConstant(true));
        let f = tree.create(NodeKind::BoolConstant(false));
        tree.add_center(not, f).unwrap();
        tree.add_left(and, t).unwrap();
        tree.add_right(and, not).unwrap();

        assert_eq!(tree.tree_to_string(and).unwrap(), "(And true (Not false))");
        assert_eq!(tree.display(not).to_string(), "(Not false)");
    }

    #[test]
    fn test_incomplete_operator_skips_empty_slots() {
        let mut tree = ExpressionTree::new();
        let sub = tree.create(NodeKind::Subtract);
        let leaf = tree.create(NodeKind::Constant(1.5));
        tree.add_right(sub, leaf).unwrap();
        assert_eq!(tree.tree_to_string(sub).unwrap(), "(Subtract 1.5)");
    }

    #[test]
    fn test_stale_display() {
        let mut tree = ExpressionTree::new();
        let leaf = tree.create(NodeKind::Constant(1.0));
        tree.remove(leaf).unwrap();
        assert!(tree.display(leaf).to_string().starts_with("<stale"));
    }
}
