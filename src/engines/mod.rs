pub mod evaluation;
pub mod generation;

pub use evaluation::RangeEvaluator;
pub use generation::NodeFactory;
