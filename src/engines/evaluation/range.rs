use crate::config::EvaluationConfig;
use crate::error::Result;
use crate::tree::ExpressionTree;
use crate::types::NodeId;
use rayon::prelude::*;
use std::ops::Range;

/// Evaluates one tree over a range of bars, in parallel for long ranges
pub struct RangeEvaluator {
    parallel_threshold: usize,
}

impl RangeEvaluator {
    pub fn new(config: &EvaluationConfig) -> Self {
        Self {
            parallel_threshold: config.parallel_threshold,
        }
    }

    fn is_parallel(&self, bars: &Range<usize>) -> bool {
        bars.len() >= self.parallel_threshold
    }

    pub fn numeric(&self, tree: &ExpressionTree, id: NodeId, bars: Range<usize>) -> Result<Vec<f64>> {
        if self.is_parallel(&bars) {
            bars.into_par_iter()
                .map(|bar| tree.evaluate_numeric(id, bar))
                .collect()
        } else {
            bars.map(|bar| tree.evaluate_numeric(id, bar)).collect()
        }
    }

    pub fn boolean(&self, tree: &ExpressionTree, id: NodeId, bars: Range<usize>) -> Result<Vec<bool>> {
        if self.is_parallel(&bars) {
            bars.into_par_iter()
                .map(|bar| tree.evaluate_boolean(id, bar))
                .collect()
        } else {
            bars.map(|bar| tree.evaluate_boolean(id, bar)).collect()
        }
    }
}

impl Default for RangeEvaluator {
    fn default() -> Self {
        Self::new(&EvaluationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::NodeKind;

    #[test]
    fn test_sequential_and_parallel_agree() {
        let mut tree = ExpressionTree::new();
        let add = tree.create(NodeKind::Add);
        let a = tree.create(NodeKind::Constant(1.0));
        let b = tree.create(NodeKind::Constant(2.0));
        tree.add_left(add, a).unwrap();
        tree.add_right(add, b).unwrap();

        let sequential = RangeEvaluator { parallel_threshold: usize::MAX };
        let parallel = RangeEvaluator { parallel_threshold: 0 };
        let expected = vec![3.0; 50];
        assert_eq!(sequential.numeric(&tree, add, 0..50).unwrap(), expected);
        assert_eq!(parallel.numeric(&tree, add, 0..50).unwrap(), expected);
    }
}
