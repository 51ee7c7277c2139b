use super::cache::SeriesCache;
use crate::error::Result;
use polars::prelude::{col, DataFrame, DataType, IntoLazy, RollingOptionsFixedWindow};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Time-indexed data window shared by every time-series node of a population.
///
/// Each call to [`SeriesSource::replace_frame`] starts a new epoch: cached
/// windows are dropped and nodes must be preprocessed again before they can
/// be evaluated.
#[derive(Debug)]
pub struct SeriesSource {
    frame: RwLock<DataFrame>,
    cache: SeriesCache,
    epoch: AtomicU64,
}

impl SeriesSource {
    pub fn new(frame: DataFrame) -> Self {
        Self {
            frame: RwLock::new(frame),
            cache: SeriesCache::new(DEFAULT_CACHE_CAPACITY),
            epoch: AtomicU64::new(0),
        }
    }

    pub fn shared(frame: DataFrame) -> Arc<Self> {
        Arc::new(Self::new(frame))
    }

    /// Number of bars in the current window
    pub fn len(&self) -> usize {
        self.frame.read().unwrap_or_else(PoisonError::into_inner).height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    pub fn column_names(&self) -> Vec<String> {
        let frame = self.frame.read().unwrap_or_else(PoisonError::into_inner);
        frame.get_column_names().iter().map(|s| s.to_string()).collect()
    }

    /// Swap in a new data window and start a new epoch.
    pub fn replace_frame(&self, frame: DataFrame) {
        let mut current = self.frame.write().unwrap_or_else(PoisonError::into_inner);
        *current = frame;
        self.cache.clear();
        let epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        log::debug!("Series source moved to epoch {} ({} bars)", epoch, current.height());
    }

    /// Raw column values cast to f64; nulls become NaN.
    pub fn column_values(&self, column: &str) -> Result<Arc<[f64]>> {
        // Cache access stays under the frame lock; replace_frame clears it
        // under the write lock.
        let frame = self.frame.read().unwrap_or_else(PoisonError::into_inner);
        let key = format!("col-{}", column);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let values = frame.column(column)?.cast(&DataType::Float64)?;
        let window: Arc<[f64]> = values
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect::<Vec<f64>>()
            .into();

        self.cache.set(key, window.clone());
        Ok(window)
    }

    /// Simple moving average of a column; the first `period - 1` bars are NaN.
    pub fn rolling_mean(&self, column: &str, period: usize) -> Result<Arc<[f64]>> {
        let frame = self.frame.read().unwrap_or_else(PoisonError::into_inner);
        let key = format!("sma-{}-{}", column, period);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let options = RollingOptionsFixedWindow {
            window_size: period,
            min_periods: period,
            ..Default::default()
        };
        let evaluated = frame
            .clone()
            .lazy()
            .select([col(column)
                .cast(DataType::Float64)
                .rolling_mean(options)
                .alias("window")])
            .collect()?;
        let window: Arc<[f64]> = evaluated
            .column("window")?
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect::<Vec<f64>>()
            .into();

        self.cache.set(key, window.clone());
        Ok(window)
    }
}
