//! Typed expression trees for genetic programming.
//!
//! Nodes live in an [`ExpressionTree`] arena and are linked through
//! generation-checked [`NodeId`] handles. Each node has a fixed return type
//! and child type, up to three owned child slots (Left, Center, Right) and a
//! non-owning parent link. Trees can be evaluated, replicated into
//! independent copies and dumped as text; time-series nodes read from a
//! shared [`SeriesSource`](data::SeriesSource) after `pre_process`.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod functions;
pub mod tree;
pub mod types;

pub use error::{ErrorKind, GpError, Result};
pub use functions::{KindSpec, KindTag, NodeKind};
pub use tree::{ExpressionNode, ExpressionTree};
pub use types::{FactoryType, NodeId, NodeType, ParentSlot, Value};
