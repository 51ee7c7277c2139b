use super::traits::TimeSeriesNode;
use crate::data::SeriesSource;
use crate::error::{GpError, Result};
use std::fmt;
use std::sync::Arc;

/// Materialized window plus the source epoch it was built for
#[derive(Debug, Clone)]
struct Window {
    values: Arc<[f64]>,
    epoch: u64,
}

impl Window {
    fn value(&self, bar: usize, lag: usize) -> Result<f64> {
        let len = self.values.len();
        if bar >= len {
            return Err(GpError::BarOutOfRange { bar, len });
        }
        match bar.checked_sub(lag) {
            Some(idx) => Ok(self.values[idx]),
            None => Ok(f64::NAN),
        }
    }
}

fn current<'a>(window: &'a Option<Window>, source: &SeriesSource, label: &dyn fmt::Display) -> Result<&'a Window> {
    window
        .as_ref()
        .filter(|w| w.epoch == source.epoch())
        .ok_or_else(|| GpError::NotPreprocessed(label.to_string()))
}

// --- Lagged column value ---
#[derive(Debug, Clone)]
pub struct SeriesValue {
    source: Arc<SeriesSource>,
    column: String,
    lag: usize,
    window: Option<Window>,
}

impl SeriesValue {
    pub fn new(source: Arc<SeriesSource>, column: impl Into<String>, lag: usize) -> Self {
        Self {
            source,
            column: column.into(),
            lag,
            window: None,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn lag(&self) -> usize {
        self.lag
    }
}

impl TimeSeriesNode for SeriesValue {
    fn source(&self) -> &Arc<SeriesSource> {
        &self.source
    }

    fn pre_process(&mut self) -> Result<()> {
        let epoch = self.source.epoch();
        let values = self.source.column_values(&self.column)?;
        if self.lag >= values.len() {
            log::warn!("{} never leaves warm-up over {} bars", self, values.len());
        }
        self.window = Some(Window { values, epoch });
        Ok(())
    }

    fn value_at(&self, bar: usize) -> Result<f64> {
        current(&self.window, &self.source, self)?.value(bar, self.lag)
    }

    fn is_ready(&self) -> bool {
        current(&self.window, &self.source, self).is_ok()
    }
}

impl fmt::Display for SeriesValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lag == 0 {
            write!(f, "{}", self.column)
        } else {
            write!(f, "{}[{}]", self.column, self.lag)
        }
    }
}

// --- Simple moving average ---
#[derive(Debug, Clone)]
pub struct MovingAverage {
    source: Arc<SeriesSource>,
    column: String,
    period: usize,
    window: Option<Window>,
}

impl MovingAverage {
    /// A zero period is treated as 1 (the raw column).
    pub fn new(source: Arc<SeriesSource>, column: impl Into<String>, period: usize) -> Self {
        Self {
            source,
            column: column.into(),
            period: period.max(1),
            window: None,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl TimeSeriesNode for MovingAverage {
    fn source(&self) -> &Arc<SeriesSource> {
        &self.source
    }

    fn pre_process(&mut self) -> Result<()> {
        let epoch = self.source.epoch();
        let values = self.source.rolling_mean(&self.column, self.period)?;
        if self.period > values.len() {
            log::warn!("{} never leaves warm-up over {} bars", self, values.len());
        }
        self.window = Some(Window { values, epoch });
        Ok(())
    }

    fn value_at(&self, bar: usize) -> Result<f64> {
        current(&self.window, &self.source, self)?.value(bar, 0)
    }

    fn is_ready(&self) -> bool {
        current(&self.window, &self.source, self).is_ok()
    }
}

impl fmt::Display for MovingAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SMA({},{})", self.column, self.period)
    }
}
