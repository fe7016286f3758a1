//! Local Cache Module
//!
//! Implements the node-local storage layer: an immutable byte value type and
//! a byte-bounded LRU map with an eviction hook.
//!
//! ## Core Concepts
//! - **ByteView**: values are opaque byte blobs. A `ByteView` is immutable and
//!   cheap to pass by value, so every layer (LRU, group, transport) can share
//!   the same buffer without copying.
//! - **Byte accounting**: capacity is expressed in bytes, not entries. Each
//!   resident entry is charged `key length + value length`.
//! - **Eviction**: when usage exceeds the configured maximum, least recently
//!   used entries are dropped until the cache fits again. An optional callback
//!   observes each evicted pair.

pub mod lru;
pub mod view;

#[cfg(test)]
mod tests;
