//! # Post List Cache
//!
//! Client-side copy of the paginated post feed, keyed by query parameters.
//!
//! ```text
//! QueryCache
//! └── entries: HashMap<PostListKey, CacheEntry>
//!     ├── data: Option<InfinitePosts>   // pages as last fetched (or patched)
//!     ├── generation: u64               // bumped by cancel(); stale fetches are dropped
//!     ├── fetching: bool                // a fetch for this key is in flight
//!     ├── stale: bool                   // invalidated since the last fetch landed
//!     └── invalidations: u32            // how many times invalidate hit this key
//! ```
//!
//! The cache is owned by `App` and only mutated inside `update()`, so the
//! hooks around a mutation (patch before the call, invalidate after) never
//! interleave with each other.

use std::collections::HashMap;

use log::debug;

use crate::api::types::{Comment, PostPage};

pub const DEFAULT_FEED_LIMIT: u32 = 10;

/// Query parameters identifying one cached feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostListKey {
    pub limit: u32,
    pub search: String,
}

impl Default for PostListKey {
    fn default() -> Self {
        Self {
            limit: DEFAULT_FEED_LIMIT,
            search: String::new(),
        }
    }
}

/// All pages loaded so far for one key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InfinitePosts {
    pub pages: Vec<PostPage>,
}

impl InfinitePosts {
    pub fn from_page(page: PostPage) -> Self {
        Self { pages: vec![page] }
    }

    /// Appends `comment` to every post whose id is `post_id`.
    /// Returns true if at least one post was patched.
    pub fn append_comment(&mut self, post_id: &str, comment: &Comment) -> bool {
        let mut patched = false;
        for post in self
            .pages
            .iter_mut()
            .flat_map(|page| page.posts.iter_mut())
            .filter(|post| post.id == post_id)
        {
            post.comments.push(comment.clone());
            patched = true;
        }
        patched
    }

    pub fn find_post(&self, post_id: &str) -> Option<&crate::api::types::Post> {
        self.pages
            .iter()
            .flat_map(|page| page.posts.iter())
            .find(|post| post.id == post_id)
    }
}

#[derive(Debug, Default)]
struct CacheEntry {
    data: Option<InfinitePosts>,
    generation: u64,
    fetching: bool,
    stale: bool,
    invalidations: u32,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<PostListKey, CacheEntry>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &PostListKey) -> Option<&InfinitePosts> {
        self.entries.get(key).and_then(|e| e.data.as_ref())
    }

    /// Marks a fetch as started and returns the generation its result must carry.
    pub fn begin_fetch(&mut self, key: &PostListKey) -> u64 {
        let entry = self.entries.entry(key.clone()).or_default();
        entry.fetching = true;
        entry.generation
    }

    /// Stores a fetched page if it belongs to the current generation.
    /// Returns false when the fetch was cancelled in the meantime.
    pub fn resolve_fetch(&mut self, key: &PostListKey, generation: u64, page: PostPage) -> bool {
        let entry = self.entries.entry(key.clone()).or_default();
        if entry.generation != generation {
            debug!(
                "Dropping fetch result for {:?} (generation {} != {})",
                key, generation, entry.generation
            );
            return false;
        }
        entry.data = Some(InfinitePosts::from_page(page));
        entry.fetching = false;
        entry.stale = false;
        true
    }

    /// Records a failed fetch. Cached data is kept.
    pub fn fail_fetch(&mut self, key: &PostListKey, generation: u64) {
        if let Some(entry) = self.entries.get_mut(key)
            && entry.generation == generation
        {
            entry.fetching = false;
        }
    }

    /// Cancels in-flight fetches for every key.
    /// Returns the keys that had a fetch running.
    pub fn cancel_all(&mut self) -> Vec<PostListKey> {
        let mut cancelled = Vec::new();
        for (key, entry) in self.entries.iter_mut() {
            if entry.fetching {
                entry.generation += 1;
                entry.fetching = false;
                cancelled.push(key.clone());
            }
        }
        if !cancelled.is_empty() {
            debug!("Cancelled {} in-flight post list fetches", cancelled.len());
        }
        cancelled
    }

    /// Replaces the data for `key` with whatever `updater` returns.
    /// The updater sees `None` when nothing is cached yet.
    pub fn set_infinite_data<F>(&mut self, key: &PostListKey, updater: F)
    where
        F: FnOnce(Option<InfinitePosts>) -> Option<InfinitePosts>,
    {
        let entry = self.entries.entry(key.clone()).or_default();
        entry.data = updater(entry.data.take());
    }

    /// Marks every cached key as stale. Returns the invalidated keys.
    pub fn invalidate_all(&mut self) -> Vec<PostListKey> {
        self.entries
            .iter_mut()
            .map(|(key, entry)| {
                entry.stale = true;
                entry.invalidations += 1;
                key.clone()
            })
            .collect()
    }

    pub fn is_stale(&self, key: &PostListKey) -> bool {
        self.entries.get(key).is_some_and(|e| e.stale)
    }

    pub fn is_fetching(&self, key: &PostListKey) -> bool {
        self.entries.get(key).is_some_and(|e| e.fetching)
    }

    pub fn invalidation_count(&self, key: &PostListKey) -> u32 {
        self.entries.get(key).map_or(0, |e| e.invalidations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_page, test_comment};

    #[test]
    fn test_default_key_matches_feed() {
        let key = PostListKey::default();
        assert_eq!(key.limit, 10);
        assert_eq!(key.search, "");
    }

    #[test]
    fn test_resolve_fetch_stores_page() {
        let mut cache = QueryCache::new();
        let key = PostListKey::default();
        let generation = cache.begin_fetch(&key);
        assert!(cache.is_fetching(&key));

        assert!(cache.resolve_fetch(&key, generation, sample_page()));
        assert!(!cache.is_fetching(&key));
        assert_eq!(cache.get(&key).unwrap().pages.len(), 1);
    }

    #[test]
    fn test_cancelled_fetch_is_dropped() {
        let mut cache = QueryCache::new();
        let key = PostListKey::default();
        let generation = cache.begin_fetch(&key);

        assert_eq!(cache.cancel_all(), vec![key.clone()]);
        assert!(!cache.resolve_fetch(&key, generation, sample_page()));
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn test_cancel_all_ignores_idle_keys() {
        let mut cache = QueryCache::new();
        let key = PostListKey::default();
        let generation = cache.begin_fetch(&key);
        cache.resolve_fetch(&key, generation, sample_page());

        assert!(cache.cancel_all().is_empty());
        // Generation untouched, so a fresh fetch still lands
        let next = cache.begin_fetch(&key);
        assert_eq!(next, generation);
    }

    #[test]
    fn test_set_infinite_data_sees_none_when_empty() {
        let mut cache = QueryCache::new();
        let key = PostListKey::default();
        let mut saw_none = false;
        cache.set_infinite_data(&key, |data| {
            saw_none = data.is_none();
            data
        });
        assert!(saw_none);
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn test_append_comment_only_touches_matching_post() {
        let mut data = InfinitePosts::from_page(sample_page());
        let comment = test_comment("hello");

        assert!(data.append_comment("p2", &comment));
        assert_eq!(data.find_post("p1").unwrap().comments.len(), 1);
        assert_eq!(data.find_post("p2").unwrap().comments.len(), 1);
        assert_eq!(
            data.find_post("p2").unwrap().comments.last().unwrap().message,
            "hello"
        );

        assert!(!data.append_comment("missing", &comment));
    }

    #[test]
    fn test_invalidate_all_counts_per_key() {
        let mut cache = QueryCache::new();
        let feed = PostListKey::default();
        let search = PostListKey {
            limit: 10,
            search: "rust".to_string(),
        };
        cache.begin_fetch(&feed);
        cache.begin_fetch(&search);

        let mut keys = cache.invalidate_all();
        keys.sort_by(|a, b| a.search.cmp(&b.search));
        assert_eq!(keys, vec![feed.clone(), search.clone()]);
        assert_eq!(cache.invalidation_count(&feed), 1);
        assert_eq!(cache.invalidation_count(&search), 1);
        assert!(cache.is_stale(&feed));
    }

    #[test]
    fn test_fail_fetch_keeps_data() {
        let mut cache = QueryCache::new();
        let key = PostListKey::default();
        let generation = cache.begin_fetch(&key);
        cache.resolve_fetch(&key, generation, sample_page());

        let generation = cache.begin_fetch(&key);
        cache.fail_fetch(&key, generation);
        assert!(!cache.is_fetching(&key));
        assert!(cache.get(&key).is_some());
    }
}
