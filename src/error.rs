use crate::types::{NodeId, NodeType, ParentSlot};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GpError {
    #[error("{kind} does not implement {evaluator}")]
    NotImplemented {
        kind: &'static str,
        evaluator: &'static str,
    },

    #[error("Stale or unknown node handle {0}")]
    StaleNode(NodeId),

    #[error("Slot {slot:?} is not valid for {kind} (arity {arity})")]
    InvalidSlot {
        kind: &'static str,
        slot: ParentSlot,
        arity: usize,
    },

    #[error("Slot {slot:?} of node {parent} is already occupied")]
    SlotOccupied { parent: NodeId, slot: ParentSlot },

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: NodeType, actual: NodeType },

    #[error("Node {0} is already attached to a parent")]
    AlreadyAttached(NodeId),

    #[error("Attaching {child} under {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    #[error("Node {parent} has no child in slot {slot:?}")]
    MissingChild { parent: NodeId, slot: ParentSlot },

    #[error("Node {0} has no parent")]
    NoParent(NodeId),

    #[error("Time-series node {0} has not been preprocessed for the current epoch")]
    NotPreprocessed(String),

    #[error("Bar {bar} is outside the series window of length {len}")]
    BarOutOfRange { bar: usize, len: usize },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Formatting error")]
    Fmt(#[from] std::fmt::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// Coarse classification of [`GpError`] for callers that only care about who
/// has to fix the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An evaluator was called on a node kind that does not provide it.
    NotImplemented,
    /// The tree-building collaborator broke the linkage contract.
    PreconditionViolation,
    /// The external data window is missing, stale or too short.
    Data,
    Configuration,
}

impl GpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GpError::NotImplemented { .. } => ErrorKind::NotImplemented,
            GpError::StaleNode(_)
            | GpError::InvalidSlot { .. }
            | GpError::SlotOccupied { .. }
            | GpError::TypeMismatch { .. }
            | GpError::AlreadyAttached(_)
            | GpError::Cycle { .. }
            | GpError::MissingChild { .. }
            | GpError::NoParent(_) => ErrorKind::PreconditionViolation,
            GpError::NotPreprocessed(_) | GpError::BarOutOfRange { .. } | GpError::Polars(_) => {
                ErrorKind::Data
            }
            GpError::Generation(_)
            | GpError::Configuration(_)
            | GpError::Io(_)
            | GpError::Fmt(_) => {
                ErrorKind::Configuration
            }
        }
    }

    pub fn is_precondition_violation(&self) -> bool {
        self.kind() == ErrorKind::PreconditionViolation
    }
}

pub type Result<T> = std::result::Result<T, GpError>;
