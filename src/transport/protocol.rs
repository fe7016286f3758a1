//! Internode Wire Protocol
//!
//! Defines the endpoint layout and the message exchanged between nodes.
//!
//! A fetch request is carried entirely by the URL
//! (`<base path><group>/<key>`, both segments percent-encoded); the response
//! body is the bincode encoding of [`FetchResponse`] served as an octet
//! stream. Errors travel as plain-text bodies on non-success statuses.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Path prefix all internode fetch routes live under.
pub const DEFAULT_BASE_PATH: &str = "/_meshcache/";

/// Virtual nodes per member on the placement ring.
pub const DEFAULT_REPLICAS: usize = 50;

/// Per-attempt timeout for internode fetches.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(500);

/// Successful fetch payload: the raw value bytes for the requested key.
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchResponse {
    pub value: Vec<u8>,
}
