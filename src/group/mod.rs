//! Cache Group Module
//!
//! Implements the read-path orchestration on top of the local cache and the
//! peer routing layer.
//!
//! ## Core Concepts
//! - **Group**: a named cache namespace with its own loader and local LRU.
//!   `Group::get` serves from memory when it can, otherwise asks the key's
//!   owner peer, and as a last resort invokes the loader against the
//!   authoritative source.
//! - **Single flight**: concurrent misses for the same key collapse into one
//!   load; every overlapping caller receives the identical outcome.
//! - **Registry**: groups are registered process-wide by name so the
//!   transport layer can resolve them straight from a request path.

pub mod flight;
pub mod group;
