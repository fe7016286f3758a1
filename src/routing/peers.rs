use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Fetches a cached value from one specific remote node.
#[async_trait]
pub trait PeerGetter: Send + Sync {
    /// Retrieves the value for `key` within the named group from the remote
    /// node this getter is bound to.
    ///
    /// Any failure (connection, non-success status, decode) is an error;
    /// there are no partial results.
    async fn fetch(&self, group: &str, key: &str) -> Result<Vec<u8>>;
}

/// Selects the remote owner of a key, if any.
pub trait PeerPicker: Send + Sync {
    /// Returns the getter for the node owning `key`, or `None` when the key
    /// should be loaded locally (no peers configured, or this node is the
    /// owner itself). Safe for concurrent callers.
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>>;
}
