use super::series::{MovingAverage, SeriesValue};
use super::traits::TimeSeriesNode;
use crate::error::Result;
use crate::types::NodeType;
use std::fmt;

/// Tag identifying a concrete node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    Constant,
    SeriesValue,
    MovingAverage,
    Add,
    Subtract,
    Multiply,
    Divide,
    Negate,
    Abs,
    Clamp,
    BoolConstant,
    And,
    Or,
    Not,
    GreaterThan,
    LessThan,
}

impl KindTag {
    pub const ALL: [KindTag; 16] = [
        KindTag::Constant,
        KindTag::SeriesValue,
        KindTag::MovingAverage,
        KindTag::Add,
        KindTag::Subtract,
        KindTag::Multiply,
        KindTag::Divide,
        KindTag::Negate,
        KindTag::Abs,
        KindTag::Clamp,
        KindTag::BoolConstant,
        KindTag::And,
        KindTag::Or,
        KindTag::Not,
        KindTag::GreaterThan,
        KindTag::LessThan,
    ];

    /// Static description of the kind: types, arity and time-series flag
    pub fn spec(self) -> KindSpec {
        match self {
            KindTag::Constant => KindSpec::numeric(self, "Constant", 0),
            KindTag::SeriesValue => KindSpec::numeric(self, "SeriesValue", 0).time_series(),
            KindTag::MovingAverage => KindSpec::numeric(self, "MovingAverage", 0).time_series(),
            KindTag::Add => KindSpec::numeric(self, "Add", 2),
            KindTag::Subtract => KindSpec::numeric(self, "Subtract", 2),
            KindTag::Multiply => KindSpec::numeric(self, "Multiply", 2),
            KindTag::Divide => KindSpec::numeric(self, "Divide", 2),
            KindTag::Negate => KindSpec::numeric(self, "Negate", 1),
            KindTag::Abs => KindSpec::numeric(self, "Abs", 1),
            KindTag::Clamp => KindSpec::numeric(self, "Clamp", 3),
            KindTag::BoolConstant => KindSpec::boolean(self, "BoolConstant", 0),
            KindTag::And => KindSpec::boolean(self, "And", 2),
            KindTag::Or => KindSpec::boolean(self, "Or", 2),
            KindTag::Not => KindSpec::boolean(self, "Not", 1),
            KindTag::GreaterThan => KindSpec::comparison(self, "GreaterThan"),
            KindTag::LessThan => KindSpec::comparison(self, "LessThan"),
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

/// Dispatch-table row for a node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSpec {
    pub tag: KindTag,
    pub name: &'static str,
    pub return_type: NodeType,
    pub child_type: NodeType,
    pub arity: usize,
    pub is_time_series: bool,
}

impl KindSpec {
    /// Boolean-only family: Boolean result over Boolean operands
    pub const fn boolean(tag: KindTag, name: &'static str, arity: usize) -> Self {
        Self {
            tag,
            name,
            return_type: NodeType::Boolean,
            child_type: NodeType::Boolean,
            arity,
            is_time_series: false,
        }
    }

    /// Numeric-only family: Numeric result over Numeric operands
    pub const fn numeric(tag: KindTag, name: &'static str, arity: usize) -> Self {
        Self {
            tag,
            name,
            return_type: NodeType::Numeric,
            child_type: NodeType::Numeric,
            arity,
            is_time_series: false,
        }
    }

    /// Boolean result over two Numeric operands
    pub const fn comparison(tag: KindTag, name: &'static str) -> Self {
        Self {
            tag,
            name,
            return_type: NodeType::Boolean,
            child_type: NodeType::Numeric,
            arity: 2,
            is_time_series: false,
        }
    }

    const fn time_series(mut self) -> Self {
        self.is_time_series = true;
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.arity == 0
    }
}

/// Concrete node kind together with its own scalar state
#[derive(Debug, Clone)]
pub enum NodeKind {
    Constant(f64),
    SeriesValue(SeriesValue),
    MovingAverage(MovingAverage),
    Add,
    Subtract,
    Multiply,
    Divide,
    Negate,
    Abs,
    Clamp,
    BoolConstant(bool),
    And,
    Or,
    Not,
    GreaterThan,
    LessThan,
}

impl NodeKind {
    pub fn tag(&self) -> KindTag {
        match self {
            NodeKind::Constant(_) => KindTag::Constant,
            NodeKind::SeriesValue(_) => KindTag::SeriesValue,
            NodeKind::MovingAverage(_) => KindTag::MovingAverage,
            NodeKind::Add => KindTag::Add,
            NodeKind::Subtract => KindTag::Subtract,
            NodeKind::Multiply => KindTag::Multiply,
            NodeKind::Divide => KindTag::Divide,
            NodeKind::Negate => KindTag::Negate,
            NodeKind::Abs => KindTag::Abs,
            NodeKind::Clamp => KindTag::Clamp,
            NodeKind::BoolConstant(_) => KindTag::BoolConstant,
            NodeKind::And => KindTag::And,
            NodeKind::Or => KindTag::Or,
            NodeKind::Not => KindTag::Not,
            NodeKind::GreaterThan => KindTag::GreaterThan,
            NodeKind::LessThan => KindTag::LessThan,
        }
    }

    /// Operator kinds carry no state, so they can be built from the tag alone.
    pub fn operator(tag: KindTag) -> Option<NodeKind> {
        Some(match tag {
            KindTag::Add => NodeKind::Add,
            KindTag::Subtract => NodeKind::Subtract,
            KindTag::Multiply => NodeKind::Multiply,
            KindTag::Divide => NodeKind::Divide,
            KindTag::Negate => NodeKind::Negate,
            KindTag::Abs => NodeKind::Abs,
            KindTag::Clamp => NodeKind::Clamp,
            KindTag::And => NodeKind::And,
            KindTag::Or => NodeKind::Or,
            KindTag::Not => NodeKind::Not,
            KindTag::GreaterThan => NodeKind::GreaterThan,
            KindTag::LessThan => NodeKind::LessThan,
            KindTag::Constant
            | KindTag::SeriesValue
            | KindTag::MovingAverage
            | KindTag::BoolConstant => return None,
        })
    }

    pub fn spec(&self) -> KindSpec {
        self.tag().spec()
    }

    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    pub fn as_time_series(&self) -> Option<&dyn TimeSeriesNode> {
        match self {
            NodeKind::SeriesValue(s) => Some(s),
            NodeKind::MovingAverage(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_time_series_mut(&mut self) -> Option<&mut dyn TimeSeriesNode> {
        match self {
            NodeKind::SeriesValue(s) => Some(s),
            NodeKind::MovingAverage(m) => Some(m),
            _ => None,
        }
    }

    /// No-op unless the kind depends on a series source.
    pub fn pre_process(&mut self) -> Result<()> {
        match self.as_time_series_mut() {
            Some(series) => series.pre_process(),
            None => Ok(()),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Constant(v) => write!(f, "{}", v),
            NodeKind::SeriesValue(s) => write!(f, "{}", s),
            NodeKind::MovingAverage(m) => write!(f, "{}", m),
            NodeKind::BoolConstant(b) => write!(f, "{}", b),
            other => write!(f, "{}", other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tag_has_consistent_spec() {
        for tag in KindTag::ALL {
            let spec = tag.spec();
            assert_eq!(spec.tag, tag);
            assert!(spec.arity <= 3);
            if spec.is_time_series {
                assert!(spec.is_terminal());
            }
        }
    }

    #[test]
    fn test_operator_constructor_covers_non_terminals() {
        for tag in KindTag::ALL {
            match NodeKind::operator(tag) {
                Some(kind) => {
                    assert_eq!(kind.tag(), tag);
                    assert!(!tag.spec().is_terminal());
                }
                None => assert!(tag.spec().is_terminal()),
            }
        }
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(NodeKind::Constant(3.0).to_string(), "3");
        assert_eq!(NodeKind::Constant(-2.5).to_string(), "-2.5");
        assert_eq!(NodeKind::BoolConstant(true).to_string(), "true");
        assert_eq!(NodeKind::Add.to_string(), "Add");
        assert_eq!(NodeKind::GreaterThan.to_string(), "GreaterThan");
    }
}
