//! View-state layer - visible line ranges and rendered card caching.
//!
//! # Module Structure
//!
//! - `visible_range`: LineRange - a half-open interval of visible lines
//! - `cache`: CardCache - LRU cache of rendered cards

pub mod cache;
pub mod visible_range;

pub use cache::{CardCache, CardCacheKey, DEFAULT_CARD_CACHE_CAPACITY};
pub use visible_range::LineRange;
