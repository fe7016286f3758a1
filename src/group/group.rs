use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, OnceLock, RwLock};

use thiserror::Error;

use super::flight::Flight;
use crate::cache::lru::LruCache;
use crate::cache::view::ByteView;
use crate::routing::peers::PeerPicker;

/// Errors surfaced by the cache read path.
///
/// Clone-able on purpose: a single load outcome fans out to every caller
/// coalesced onto it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("key is required")]
    KeyRequired,

    #[error("no group named {0:?}")]
    NoSuchGroup(String),

    /// The loader (or an aborted in-flight load) failed for this key. Peer
    /// failures never surface here directly; they fall through to the loader
    /// first.
    #[error("loading key {key:?} failed: {reason}")]
    Load { key: String, reason: String },
}

impl CacheError {
    fn load(key: &str, err: &anyhow::Error) -> Self {
        Self::Load {
            key: key.to_owned(),
            reason: format!("{err:#}"),
        }
    }
}

/// Materializes a value from the authoritative source on a cache miss.
pub type LoaderFn = Arc<
    dyn Fn(String) -> Pin<Box<dyn Future<Output = anyhow::Result<Vec<u8>>> + Send>> + Send + Sync,
>;

/// A named read-through cache namespace.
///
/// Each group owns its local LRU and loader; an optional peer picker routes
/// misses to the cluster member owning the key. Groups are created through
/// [`new_group`] and live for the remainder of the process.
pub struct Group {
    name: String,
    loader: LoaderFn,
    cache: Mutex<LruCache>,
    peers: OnceLock<Arc<dyn PeerPicker>>,
    flight: Flight<Result<ByteView, CacheError>>,
}

static GROUPS: LazyLock<RwLock<HashMap<String, Arc<Group>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Creates and registers a group under a process-unique name.
///
/// `max_bytes` bounds the local cache (zero disables eviction). The loader
/// is any async closure from key to bytes; its error means "no such key or
/// source unreachable" and is passed through to callers uncached.
///
/// # Panics
/// Panics when a group with the same name is already registered: replacing a
/// live group would silently drop its cache, so this is treated as a
/// programmer error.
pub fn new_group<F, Fut>(name: &str, max_bytes: usize, loader: F) -> Arc<Group>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Vec<u8>>> + Send + 'static,
{
    let loader: LoaderFn = Arc::new(move |key: String| {
        Box::pin(loader(key)) as Pin<Box<dyn Future<Output = anyhow::Result<Vec<u8>>> + Send>>
    });

    let group = Arc::new(Group {
        name: name.to_owned(),
        loader,
        cache: Mutex::new(LruCache::new(max_bytes)),
        peers: OnceLock::new(),
        flight: Flight::new(),
    });

    let mut groups = GROUPS.write().unwrap_or_else(|e| e.into_inner());
    if groups.contains_key(name) {
        panic!("group {:?} is already registered", name);
    }
    groups.insert(name.to_owned(), group.clone());

    tracing::info!("Registered cache group {:?}", name);
    group
}

/// Looks up a previously registered group by name.
pub fn get_group(name: &str) -> Option<Arc<Group>> {
    GROUPS
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .get(name)
        .cloned()
}

impl Group {
    pub fn name(&self) -> &str {
        &self.name
    }

    fn cache(&self) -> MutexGuard<'_, LruCache> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Resolves `key` to its cached value.
    ///
    /// Checks the local cache first; on a miss the load goes through the
    /// single-flight layer, so overlapping misses for one key cost a single
    /// peer fetch or loader invocation.
    pub async fn get(&self, key: &str) -> Result<ByteView, CacheError> {
        if key.is_empty() {
            return Err(CacheError::KeyRequired);
        }

        if let Some(view) = self.cache().get(key) {
            tracing::debug!("GET: hit for {:?} in group {:?}", key, self.name);
            return Ok(view);
        }

        self.load(key).await
    }

    async fn load(&self, key: &str) -> Result<ByteView, CacheError> {
        let outcome = self
            .flight
            .run(key, || async {
                if let Some(picker) = self.peers.get()
                    && let Some(peer) = picker.pick_peer(key)
                {
                    match peer.fetch(&self.name, key).await {
                        // The owner holds the authoritative cached copy;
                        // do not duplicate it into the local cache.
                        Ok(bytes) => return Ok(ByteView::from(bytes)),
                        Err(e) => {
                            tracing::warn!(
                                "GET: peer fetch for {:?} failed, loading locally: {:#}",
                                key,
                                e
                            );
                        }
                    }
                }

                self.load_locally(key).await
            })
            .await;

        match outcome {
            Ok(result) => result,
            Err(e) => Err(CacheError::load(key, &e)),
        }
    }

    async fn load_locally(&self, key: &str) -> Result<ByteView, CacheError> {
        let bytes = (self.loader)(key.to_owned())
            .await
            .map_err(|e| CacheError::load(key, &e))?;

        let view = ByteView::from(bytes);
        self.cache().add(key, view.clone());
        Ok(view)
    }

    /// Installs the peer picker routing misses to their owner nodes.
    ///
    /// # Panics
    /// Panics when called a second time for the same group.
    pub fn register_peers(&self, picker: Arc<dyn PeerPicker>) {
        if self.peers.set(picker).is_err() {
            panic!("register_peers called more than once for group {:?}", self.name);
        }
    }

    /// Number of entries resident in the local cache.
    pub fn cache_len(&self) -> usize {
        self.cache().len()
    }

    /// Bytes resident in the local cache (keys + values).
    pub fn cache_bytes(&self) -> usize {
        self.cache().used_bytes()
    }
}
