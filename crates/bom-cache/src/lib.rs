//! # BOM Cache
//!
//! 展開結果快取與髒標記追蹤

pub mod dirty_tracking;
pub mod explosion_cache;

// Re-export 主要類型
pub use dirty_tracking::DirtyTracker;
pub use explosion_cache::{CacheStats, ExplosionCache};
