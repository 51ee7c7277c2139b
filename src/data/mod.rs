pub mod cache;
pub mod source;

pub use cache::SeriesCache;
pub use source::SeriesSource;
