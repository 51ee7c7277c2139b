pub mod expression;
pub mod preprocess;
pub mod range;

pub use range::RangeEvaluator;
