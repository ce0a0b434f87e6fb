// Wed Oct 14 2026 - Alex

use crate::path::{PathError, TokenPath};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Parsed paths keyed by their source string. Only successful parses are kept.
pub struct PathCache {
    cache: RwLock<HashMap<String, Arc<TokenPath>>>,
    max_size: usize,
}

impl PathCache {
    pub fn new(max_size: usize) -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            max_size,
        }
    }

    pub fn get(&self, path: &str) -> Option<Arc<TokenPath>> {
        self.cache.read().get(path).cloned()
    }

    pub fn get_or_parse(&self, path: &str) -> Result<Arc<TokenPath>, PathError> {
        if let Some(parsed) = self.get(path) {
            return Ok(parsed);
        }

        let parsed = Arc::new(TokenPath::parse(path)?);
        self.insert(path, parsed.clone());
        Ok(parsed)
    }

    pub fn insert(&self, path: &str, parsed: Arc<TokenPath>) {
        if self.max_size == 0 {
            return;
        }

        let mut cache = self.cache.write();
        if cache.len() >= self.max_size {
            log::debug!("Path cache full ({} entries), clearing", cache.len());
            cache.clear();
        }
        cache.insert(path.to_string(), parsed);
    }

    pub fn clear(&self) {
        self.cache.write().clear();
    }

    pub fn size(&self) -> usize {
        self.cache.read().len()
    }
}

impl Default for PathCache {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_reuses_parsed_path() {
        let cache = PathCache::new(4);
        let first = cache.get_or_parse("{{parent}} input").unwrap();
        let second = cache.get_or_parse("{{parent}} input").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_cache_skips_failed_parses_and_clears_when_full() {
        let cache = PathCache::new(2);
        assert!(cache.get_or_parse("{{nope@x}}").is_err());
        assert_eq!(cache.size(), 0);

        cache.get_or_parse("a").unwrap();
        cache.get_or_parse("b").unwrap();
        cache.get_or_parse("c").unwrap();
        assert_eq!(cache.size(), 1);
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_zero_sized_cache_stores_nothing() {
        let cache = PathCache::new(0);
        cache.get_or_parse("a").unwrap();
        assert_eq!(cache.size(), 0);
    }
}
