use crate::error::{GpError, Result};
use crate::functions::numeric::{clamp_between, protected_div};
use crate::functions::{NodeKind, TimeSeriesNode};
use crate::tree::ExpressionTree;
use crate::types::{NodeId, NodeType, ParentSlot, Value};

impl ExpressionTree {
    /// Evaluate a Numeric-returning subtree at time index `bar`.
    ///
    /// `bar` only matters to time-series nodes. Boolean-returning kinds fail
    /// with [`GpError::NotImplemented`].
    ///
    /// Recurses once per tree level, so stack use grows with
    /// [`ExpressionTree::height`]. Factory-built trees stay within
    /// `max_depth`; hand-built chains deeper than a few thousand levels
    /// need a larger thread stack.
    pub fn evaluate_numeric(&self, id: NodeId, bar: usize) -> Result<f64> {
        let node = self.node(id)?;
        match node.kind() {
            NodeKind::Constant(v) => Ok(*v),
            NodeKind::SeriesValue(series) => series.value_at(bar),
            NodeKind::MovingAverage(series) => series.value_at(bar),
            NodeKind::Add => {
                let (a, b) = self.numeric_pair(id, bar)?;
                Ok(a + b)
            }
            NodeKind::Subtract => {
                let (a, b) = self.numeric_pair(id, bar)?;
                Ok(a - b)
            }
            NodeKind::Multiply => {
                let (a, b) = self.numeric_pair(id, bar)?;
                Ok(a * b)
            }
            NodeKind::Divide => {
                let (a, b) = self.numeric_pair(id, bar)?;
                Ok(protected_div(a, b))
            }
            NodeKind::Negate => Ok(-self.numeric_operand(id, ParentSlot::Center, bar)?),
            NodeKind::Abs => Ok(self.numeric_operand(id, ParentSlot::Center, bar)?.abs()),
            NodeKind::Clamp => {
                let lower = self.numeric_operand(id, ParentSlot::Left, bar)?;
                let value = self.numeric_operand(id, ParentSlot::Center, bar)?;
                let upper = self.numeric_operand(id, ParentSlot::Right, bar)?;
                Ok(clamp_between(value, lower, upper))
            }
            NodeKind::BoolConstant(_)
            | NodeKind::And
            | NodeKind::Or
            | NodeKind::Not
            | NodeKind::GreaterThan
            | NodeKind::LessThan => Err(GpError::NotImplemented {
                kind: node.name(),
                evaluator: "evaluate_numeric",
            }),
        }
    }

    /// Evaluate a Boolean-returning subtree at time index `bar`.
    ///
    /// Numeric-returning kinds fail with [`GpError::NotImplemented`].
    pub fn evaluate_boolean(&self, id: NodeId, bar: usize) -> Result<bool> {
        let node = self.node(id)?;
        match node.kind() {
            NodeKind::BoolConstant(b) => Ok(*b),
            NodeKind::And => {
                // Both sides are evaluated so malformed subtrees always surface.
                let a = self.boolean_operand(id, ParentSlot::Left, bar)?;
                let b = self.boolean_operand(id, ParentSlot::Right, bar)?;
                Ok(a && b)
            }
            NodeKind::Or => {
                let a = self.boolean_operand(id, ParentSlot::Left, bar)?;
                let b = self.boolean_operand(id, ParentSlot::Right, bar)?;
                Ok(a || b)
            }
            NodeKind::Not => Ok(!self.boolean_operand(id, ParentSlot::Center, bar)?),
            NodeKind::GreaterThan => {
                let (a, b) = self.numeric_pair(id, bar)?;
                Ok(a > b)
            }
            NodeKind::LessThan => {
                let (a, b) = self.numeric_pair(id, bar)?;
                Ok(a < b)
            }
            NodeKind::Constant(_)
            | NodeKind::SeriesValue(_)
            | NodeKind::MovingAverage(_)
            | NodeKind::Add
            | NodeKind::Subtract
            | NodeKind::Multiply
            | NodeKind::Divide
            | NodeKind::Negate
            | NodeKind::Abs
            | NodeKind::Clamp => Err(GpError::NotImplemented {
                kind: node.name(),
                evaluator: "evaluate_boolean",
            }),
        }
    }

    /// Evaluate through the accessor matching the node's return type.
    pub fn evaluate(&self, id: NodeId, bar: usize) -> Result<Value> {
        match self.node(id)?.return_type() {
            NodeType::Boolean => self.evaluate_boolean(id, bar).map(Value::Boolean),
            NodeType::Numeric => self.evaluate_numeric(id, bar).map(Value::Numeric),
        }
    }

    fn numeric_operand(&self, id: NodeId, slot: ParentSlot, bar: usize) -> Result<f64> {
        self.evaluate_numeric(self.child(id, slot)?, bar)
    }

    fn numeric_pair(&self, id: NodeId, bar: usize) -> Result<(f64, f64)> {
        Ok((
            self.numeric_operand(id, ParentSlot::Left, bar)?,
            self.numeric_operand(id, ParentSlot::Right, bar)?,
        ))
    }

    fn boolean_operand(&self, id: NodeId, slot: ParentSlot, bar: usize) -> Result<bool> {
        self.evaluate_boolean(self.child(id, slot)?, bar)
    }
}
