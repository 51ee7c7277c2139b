use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Materialized f64 windows keyed by column/indicator signature
#[derive(Debug)]
pub struct SeriesCache {
    data: Mutex<HashMap<String, Arc<[f64]>>>,
    capacity: usize,
}

impl SeriesCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Mutex::new(HashMap::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<[f64]>> {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.get(key).cloned()
    }

    pub fn set(&self, key: String, value: Arc<[f64]>) {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        if data.len() >= self.capacity {
            // Clear everything when full.
            data.clear();
        }
        data.insert(key, value);
    }

    pub fn clear(&self) {
        self.data.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    pub fn len(&self) -> usize {
        self.data.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
