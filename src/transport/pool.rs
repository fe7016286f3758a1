use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard};
use std::time::Duration;

use super::client::HttpPeer;
use super::protocol::{DEFAULT_BASE_PATH, DEFAULT_FETCH_TIMEOUT, DEFAULT_REPLICAS};
use crate::routing::peers::{PeerGetter, PeerPicker};
use crate::routing::ring::HashRing;

/// Routes keys to cluster members over HTTP.
///
/// The pool knows the full member list (this node included, addressed as
/// `host:port`), places keys with a consistent-hash ring, and keeps one
/// [`HttpPeer`] per remote member. It is the picker installed into cache
/// groups via `register_peers`.
pub struct HttpPool {
    self_addr: String,
    replicas: usize,
    timeout: Duration,
    inner: RwLock<PoolState>,
}

struct PoolState {
    ring: HashRing,
    getters: HashMap<String, Arc<HttpPeer>>,
}

impl HttpPool {
    /// Creates a pool for the node reachable at `self_addr` (`host:port`)
    /// with default placement settings.
    pub fn new(self_addr: &str) -> Self {
        Self::with_config(self_addr, DEFAULT_REPLICAS, DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_config(self_addr: &str, replicas: usize, timeout: Duration) -> Self {
        Self {
            self_addr: self_addr.to_owned(),
            replicas,
            timeout,
            inner: RwLock::new(PoolState {
                ring: HashRing::new(replicas),
                getters: HashMap::new(),
            }),
        }
    }

    fn state(&self) -> RwLockReadGuard<'_, PoolState> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Replaces the member set.
    ///
    /// Ring and getter index are rebuilt from scratch and swapped in under
    /// the write lock, so readers see either the old or the new view, never
    /// a partial one.
    pub fn set_peers<S: AsRef<str>>(&self, peers: &[S]) {
        let mut ring = HashRing::new(self.replicas);
        ring.add(peers);

        let getters = peers
            .iter()
            .map(|peer| {
                let addr = peer.as_ref().to_owned();
                let base_url = format!("http://{}{}", addr, DEFAULT_BASE_PATH);
                (addr, Arc::new(HttpPeer::new(base_url, self.timeout)))
            })
            .collect();

        let mut state = self.inner.write().unwrap_or_else(|e| e.into_inner());
        state.ring = ring;
        state.getters = getters;

        tracing::info!("[{}] placement ring rebuilt for {} member(s)", self.self_addr, peers.len());
    }

    /// This node's own `host:port` identity on the ring.
    pub fn self_addr(&self) -> &str {
        &self.self_addr
    }
}

impl PeerPicker for HttpPool {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>> {
        let state = self.state();
        let owner = state.ring.get(key);
        if owner.is_empty() || owner == self.self_addr {
            return None;
        }

        tracing::debug!("[{}] picked peer {} for key {:?}", self.self_addr, owner, key);
        state
            .getters
            .get(owner)
            .map(|getter| getter.clone() as Arc<dyn PeerGetter>)
    }
}
