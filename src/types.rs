use serde::{Deserialize, Serialize};
use std::fmt;

/// Type a node yields when evaluated (and the type its children must yield)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Boolean,
    Numeric,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::Boolean => write!(f, "Boolean"),
            NodeType::Numeric => write!(f, "Numeric"),
        }
    }
}

/// Which slot of its parent a node occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParentSlot {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl ParentSlot {
    /// Child slots in serialization order
    pub const CHILD_SLOTS: [ParentSlot; 3] = [ParentSlot::Left, ParentSlot::Center, ParentSlot::Right];

    /// Slots a node of the given arity accepts, in Left, Center, Right order.
    pub fn slots_for(arity: usize) -> &'static [ParentSlot] {
        match arity {
            0 => &[],
            1 => &[ParentSlot::Center],
            2 => &[ParentSlot::Left, ParentSlot::Right],
            _ => &Self::CHILD_SLOTS,
        }
    }

    pub fn is_valid_for(self, arity: usize) -> bool {
        Self::slots_for(arity).contains(&self)
    }

    pub(crate) fn index(self) -> Option<usize> {
        match self {
            ParentSlot::None => None,
            ParentSlot::Left => Some(0),
            ParentSlot::Center => Some(1),
            ParentSlot::Right => Some(2),
        }
    }
}

/// Node category requested from the factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactoryType {
    All,
    Terminals,
    Operators,
}

/// Generation-checked handle to a node stored in an `ExpressionTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Result of evaluating a node of either return type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Boolean(bool),
    Numeric(f64),
}

impl Value {
    pub fn node_type(&self) -> NodeType {
        match self {
            Value::Boolean(_) => NodeType::Boolean,
            Value::Numeric(_) => NodeType::Numeric,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            Value::Numeric(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Numeric(v) => Some(*v),
            Value::Boolean(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_for_arity() {
        assert!(ParentSlot::slots_for(0).is_empty());
        assert_eq!(ParentSlot::slots_for(1), &[ParentSlot::Center]);
        assert_eq!(ParentSlot::slots_for(2), &[ParentSlot::Left, ParentSlot::Right]);
        assert_eq!(ParentSlot::slots_for(3).len(), 3);
    }

    #[test]
    fn test_none_is_never_a_valid_slot() {
        for arity in 0..=3 {
            assert!(!ParentSlot::None.is_valid_for(arity));
        }
        assert!(!ParentSlot::Left.is_valid_for(1));
        assert!(ParentSlot::Center.is_valid_for(3));
    }
}
