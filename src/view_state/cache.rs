//! LRU cache for rendered card output.

use crate::view::card::TimelineCard;
use crate::view::styles::CardStyles;
use lru::LruCache;
use ratatui::text::Line;
use std::num::NonZeroUsize;

/// Capacity used when the configured one is zero.
pub const DEFAULT_CARD_CACHE_CAPACITY: usize = 256;

/// Key for card cache lookup.
///
/// A card's rendering is fully determined by its raw text and whether it is
/// focused, so those two fields are the whole key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardCacheKey {
    /// Raw text of the entry.
    pub raw_text: String,
    /// Whether the card was focused.
    pub focused: bool,
}

impl CardCacheKey {
    /// Key for `card` in the given focus state.
    pub fn new(card: &TimelineCard, focused: bool) -> Self {
        Self {
            raw_text: card.raw_text.clone(),
            focused,
        }
    }
}

/// Bounded LRU cache of rendered cards.
///
/// Styles are fixed for the lifetime of the cache; call [`CardCache::clear`]
/// after changing them.
pub struct CardCache {
    cache: LruCache<CardCacheKey, Vec<Line<'static>>>,
}

impl CardCache {
    /// Create new cache with given capacity.
    ///
    /// If capacity is 0, uses [`DEFAULT_CARD_CACHE_CAPACITY`].
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .or(NonZeroUsize::new(DEFAULT_CARD_CACHE_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Rendered lines for `card`, rendering on a miss.
    pub fn get_or_render(
        &mut self,
        card: &TimelineCard,
        styles: &CardStyles,
        focused: bool,
    ) -> &[Line<'static>] {
        self.cache
            .get_or_insert(CardCacheKey::new(card, focused), || {
                card.render_lines(styles, focused)
            })
            .as_slice()
    }

    /// Check if a rendering is cached, without touching LRU order.
    pub fn contains(&self, key: &CardCacheKey) -> bool {
        self.cache.contains(key)
    }

    /// Clear the cache.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Number of cached renderings.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for CardCache {
    fn default() -> Self {
        Self::new(DEFAULT_CARD_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for CardCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardCache")
            .field("len", &self.cache.len())
            .field("cap", &self.cache.cap())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::parser::block::DEFAULT_MAX_LOOKBACK;
    use crate::scan::scan_document;
    use crate::view::styles::ColorConfig;

    fn cards(text: &str) -> Vec<TimelineCard> {
        let doc = Document::new(text);
        scan_document(&doc, DEFAULT_MAX_LOOKBACK)
            .iter()
            .map(TimelineCard::from_entry)
            .collect()
    }

    fn styles() -> CardStyles {
        CardStyles::with_color_config(ColorConfig::from_env_and_args(true))
    }

    #[test]
    fn new_creates_empty_cache() {
        let cache = CardCache::new(10);
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn zero_capacity_falls_back_to_default() {
        let mut cache = CardCache::new(0);
        let all = cards("09:00 a\n10:00 b\n11:00 c");
        for card in &all {
            cache.get_or_render(card, &styles(), false);
        }
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn get_or_render_matches_direct_render() {
        let mut cache = CardCache::new(4);
        let card = &cards("09:00 [[Standup]] with [[Anna]]")[0];
        let direct = card.render_lines(&styles(), false);
        assert_eq!(cache.get_or_render(card, &styles(), false), direct.as_slice());
    }

    #[test]
    fn equal_cards_share_one_entry() {
        let mut cache = CardCache::new(4);
        let first = &cards("09:00 a")[0];
        let moved = &cards("intro\n\n09:00 a")[0];
        cache.get_or_render(first, &styles(), false);
        cache.get_or_render(moved, &styles(), false);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn focus_state_is_part_of_the_key() {
        let mut cache = CardCache::new(4);
        let card = &cards("09:00 a")[0];
        cache.get_or_render(card, &styles(), false);
        cache.get_or_render(card, &styles(), true);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let mut cache = CardCache::new(2);
        let all = cards("09:00 a\n10:00 b\n11:00 c");
        cache.get_or_render(&all[0], &styles(), false);
        cache.get_or_render(&all[1], &styles(), false);
        // Touch `a` so `b` becomes the eviction candidate.
        cache.get_or_render(&all[0], &styles(), false);
        cache.get_or_render(&all[2], &styles(), false);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&CardCacheKey::new(&all[0], false)));
        assert!(!cache.contains(&CardCacheKey::new(&all[1], false)));
        assert!(cache.contains(&CardCacheKey::new(&all[2], false)));
    }

    #[test]
    fn clear_removes_all_entries() {
        let mut cache = CardCache::default();
        for card in &cards("09:00 a\n10:00 b") {
            cache.get_or_render(card, &styles(), false);
        }
        cache.clear();
        assert!(cache.is_empty());
    }
}
