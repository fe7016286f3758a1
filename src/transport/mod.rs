//! Peer Transport Module
//!
//! HTTP realization of the peer contract defined in `routing`.
//!
//! ## Core Concepts
//! - **Internode endpoint**: every node serves
//!   `GET /_meshcache/<group>/<key>` and answers with a binary-encoded
//!   response message carrying the value bytes.
//! - **Pool**: `HttpPool` combines the consistent-hash ring with one HTTP
//!   getter per member and implements `PeerPicker` for the cache groups.
//!   Membership changes rebuild ring and getter index atomically.
//! - **Client**: `HttpPeer` implements `PeerGetter` over reqwest with
//!   bounded retries and per-request timeouts.

pub mod client;
pub mod handlers;
pub mod pool;
pub mod protocol;
