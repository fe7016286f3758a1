//! Key Placement Module
//!
//! Decides which cluster member owns a given key.
//!
//! ## Core Concepts
//! - **Consistent hashing**: members are projected onto a ring of 32-bit hash
//!   positions. A key belongs to the first member at or after its own hash,
//!   wrapping around at the top. Adding or removing one member only moves the
//!   keys adjacent to its positions.
//! - **Virtual nodes**: each member occupies many ring positions so that load
//!   spreads evenly even with a handful of members.
//! - **Peer contract**: the cache core only sees the `PeerPicker` and
//!   `PeerGetter` traits; any transport that can answer "who owns this key"
//!   and "fetch this key from that owner" plugs in here.

pub mod peers;
pub mod ring;

#[cfg(test)]
mod tests;
