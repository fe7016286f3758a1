#[cfg(test)]
mod tests {
    use crate::cache::lru::LruCache;
    use crate::cache::view::ByteView;
    use std::sync::{Arc, Mutex};

    // ============================================================
    // BYTE VIEW TESTS
    // ============================================================

    #[test]
    fn test_byteview_reports_length() {
        let view = ByteView::from("hello");
        assert_eq!(view.len(), 5);
        assert!(!view.is_empty());
        assert_eq!(view.to_string_lossy(), "hello");
    }

    #[test]
    fn test_byteview_copy_is_defensive() {
        let view = ByteView::from(vec![1u8, 2, 3]);

        let mut copy = view.to_vec();
        copy[0] = 99;

        // The original is untouched and later copies start fresh.
        assert_eq!(view.as_bytes(), &[1, 2, 3]);
        assert_eq!(view.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_byteview_clones_share_contents() {
        let view = ByteView::from("payload");
        let clone = view.clone();
        assert_eq!(view, clone);
        assert_eq!(clone.as_bytes(), b"payload");
    }

    // ============================================================
    // LRU TESTS
    // ============================================================

    #[test]
    fn test_lru_add_then_get() {
        let mut lru = LruCache::new(0);
        lru.add("key1", ByteView::from("value1"));

        assert_eq!(lru.get("key1"), Some(ByteView::from("value1")));
        assert_eq!(lru.get("key2"), None);
    }

    #[test]
    fn test_lru_tracks_byte_usage() {
        let mut lru = LruCache::new(0);
        lru.add("key1", ByteView::from("value1"));
        lru.add("key2", ByteView::from("v2"));

        // 4 + 6 for the first entry, 4 + 2 for the second.
        assert_eq!(lru.used_bytes(), 16);
        assert_eq!(lru.len(), 2);
    }

    #[test]
    fn test_lru_overwrite_adjusts_usage_and_recency() {
        let mut lru = LruCache::new(0);
        lru.add("a", ByteView::from("xxxx"));
        lru.add("b", ByteView::from("yyyy"));

        lru.add("a", ByteView::from("xx"));
        assert_eq!(lru.used_bytes(), 1 + 2 + 1 + 4);
        assert_eq!(lru.len(), 2);

        // "a" was refreshed by the overwrite, so "b" is now coldest.
        lru.remove_oldest();
        assert_eq!(lru.get("b"), None);
        assert_eq!(lru.get("a"), Some(ByteView::from("xx")));
    }

    #[test]
    fn test_lru_evicts_oldest_beyond_capacity() {
        let max = "key1".len() + "key2".len() + "value1".len() + "value2".len();
        let mut lru = LruCache::new(max);

        lru.add("key1", ByteView::from("value1"));
        lru.add("key2", ByteView::from("value2"));
        lru.add("k3", ByteView::from("v3"));

        assert_eq!(lru.get("key1"), None);
        assert_eq!(lru.len(), 2);
    }

    #[test]
    fn test_lru_get_refreshes_recency() {
        let max = "key1".len() + "key2".len() + "value1".len() + "value2".len();
        let mut lru = LruCache::new(max);

        lru.add("key1", ByteView::from("value1"));
        lru.add("key2", ByteView::from("value2"));

        // Touch key1 so that key2 becomes the eviction candidate.
        assert!(lru.get("key1").is_some());
        lru.add("k3", ByteView::from("v3"));

        assert_eq!(lru.get("key2"), None);
        assert!(lru.get("key1").is_some());
    }

    #[test]
    fn test_lru_eviction_callback_observes_pairs() {
        let evicted: Arc<Mutex<Vec<(String, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let log = evicted.clone();

        let max = "key1".len() + "key2".len() + "value1".len() + "value2".len();
        let mut lru = LruCache::with_eviction(
            max,
            Box::new(move |key, value| {
                log.lock()
                    .unwrap()
                    .push((key.to_owned(), value.to_string_lossy()));
            }),
        );

        lru.add("key1", ByteView::from("value1"));
        lru.add("key2", ByteView::from("value2"));
        lru.add("k3", ByteView::from("v3"));

        assert_eq!(
            *evicted.lock().unwrap(),
            vec![("key1".to_owned(), "value1".to_owned())]
        );

        // key2 is now the coldest entry; the next overflow reports it.
        lru.add("k4", ByteView::from("value4"));
        assert_eq!(
            *evicted.lock().unwrap(),
            vec![
                ("key1".to_owned(), "value1".to_owned()),
                ("key2".to_owned(), "value2".to_owned()),
            ]
        );
    }

    #[test]
    fn test_lru_zero_max_never_evicts() {
        let mut lru = LruCache::new(0);
        for i in 0..1000 {
            lru.add(&format!("key-{}", i), ByteView::from("some value"));
        }
        assert_eq!(lru.len(), 1000);
    }

    #[test]
    fn test_lru_oversized_entry_evicts_itself() {
        let mut lru = LruCache::new(10);
        lru.add("small", ByteView::from("v"));

        // A single entry bigger than the whole cache must not loop forever;
        // it flushes everything, itself included.
        lru.add("big", ByteView::from("a value far beyond ten bytes"));

        assert_eq!(lru.len(), 0);
        assert_eq!(lru.used_bytes(), 0);
        assert_eq!(lru.get("big"), None);
    }

    #[test]
    fn test_lru_remove_oldest_on_empty_is_noop() {
        let mut lru = LruCache::new(16);
        lru.remove_oldest();
        assert_eq!(lru.len(), 0);
        assert_eq!(lru.used_bytes(), 0);
    }
}
