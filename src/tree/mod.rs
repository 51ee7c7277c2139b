pub mod arena;
pub mod display;
pub mod node;
pub mod replicate;

pub use arena::ExpressionTree;
pub use display::TreeDisplay;
pub use node::ExpressionNode;
