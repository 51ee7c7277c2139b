use crate::error::Result;
use crate::data::SeriesSource;
use std::sync::Arc;

/// Node kinds whose value depends on an external, time-indexed data window
pub trait TimeSeriesNode {
    /// Source the window is materialized from
    fn source(&self) -> &Arc<SeriesSource>;

    /// Refresh the materialized window for the source's current epoch
    fn pre_process(&mut self) -> Result<()>;

    /// Value at the given bar; NaN while the window is still warming up
    fn value_at(&self, bar: usize) -> Result<f64>;

    /// Whether the window matches the source's current epoch
    fn is_ready(&self) -> bool;
}
