pub mod kinds;
pub mod numeric;
pub mod registry;
pub mod series;
pub mod traits;

pub use kinds::{KindSpec, KindTag, NodeKind};
pub use registry::KindRegistry;
pub use series::{MovingAverage, SeriesValue};
pub use traits::TimeSeriesNode;
