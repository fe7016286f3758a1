//! Distributed Read-Through Byte Cache Library
//!
//! This library crate defines the core modules of a peer-to-peer caching node.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of four loosely coupled subsystems:
//!
//! - **`cache`**: The local storage layer. A byte-bounded LRU map plus the
//!   immutable `ByteView` value type that all other layers exchange.
//! - **`group`**: The read-path orchestrator. A `Group` is a named cache
//!   namespace that resolves a key against its local LRU, a remote owner
//!   peer, or the application-supplied loader, collapsing concurrent misses
//!   for the same key into a single load.
//! - **`routing`**: The placement layer. A consistent-hash ring with virtual
//!   nodes deterministically assigns each key to one member of the cluster,
//!   behind transport-agnostic picker/getter traits.
//! - **`transport`**: The HTTP realization of the peer contract. Exposes the
//!   internode fetch endpoint and implements the client used to query the
//!   owner of a key on another node.

pub mod cache;
pub mod group;
pub mod routing;
pub mod transport;
