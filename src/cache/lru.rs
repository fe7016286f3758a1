use linked_hash_map::LinkedHashMap;

use super::view::ByteView;

/// Hook invoked with each entry removed under capacity pressure.
///
/// Runs synchronously on the thread performing the mutation and must not
/// touch the cache it was installed on.
pub type EvictCallback = Box<dyn FnMut(&str, &ByteView) + Send>;

/// A byte-bounded map with least-recently-used eviction.
///
/// Capacity is measured in bytes: every resident entry is charged its key
/// length plus its value length, and once the total exceeds `max_bytes`
/// entries are dropped from the cold end until it fits again. A `max_bytes`
/// of zero disables eviction entirely.
///
/// Reads refresh recency. The structure itself is not thread-safe; the
/// owning layer guards it with its own mutex.
pub struct LruCache {
    max_bytes: usize,
    used_bytes: usize,
    // Front is the coldest entry, back the most recently used.
    entries: LinkedHashMap<String, ByteView>,
    on_evict: Option<EvictCallback>,
}

impl LruCache {
    /// Creates a cache holding at most `max_bytes` of keys + values.
    /// Zero means unbounded.
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            used_bytes: 0,
            entries: LinkedHashMap::new(),
            on_evict: None,
        }
    }

    /// Creates a cache that reports every eviction to `on_evict`.
    pub fn with_eviction(max_bytes: usize, on_evict: EvictCallback) -> Self {
        Self {
            max_bytes,
            used_bytes: 0,
            entries: LinkedHashMap::new(),
            on_evict: Some(on_evict),
        }
    }

    /// Looks up `key`, marking it most recently used on a hit.
    pub fn get(&mut self, key: &str) -> Option<ByteView> {
        self.entries.get_refresh(key).map(|value| value.clone())
    }

    /// Inserts or overwrites `key`, then evicts cold entries until the
    /// configured maximum is respected.
    ///
    /// An entry larger than the whole cache is admitted and then evicted
    /// again by the same call, together with everything colder than it.
    pub fn add(&mut self, key: &str, value: ByteView) {
        if let Some(slot) = self.entries.get_refresh(key) {
            self.used_bytes = self.used_bytes - slot.len() + value.len();
            *slot = value;
        } else {
            self.used_bytes += key.len() + value.len();
            self.entries.insert(key.to_owned(), value);
        }

        while self.max_bytes != 0 && self.used_bytes > self.max_bytes {
            self.remove_oldest();
        }
    }

    /// Drops the least recently used entry, if any, and reports it to the
    /// eviction callback.
    pub fn remove_oldest(&mut self) {
        if let Some((key, value)) = self.entries.pop_front() {
            self.used_bytes -= key.len() + value.len();
            if let Some(on_evict) = self.on_evict.as_mut() {
                on_evict(&key, &value);
            }
        }
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bytes currently charged against the maximum.
    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }
}
