use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::time::Duration;

use super::protocol::FetchResponse;
use crate::routing::peers::PeerGetter;

const RETRY_ATTEMPTS: usize = 3;

/// HTTP client bound to one remote node's fetch endpoint.
pub struct HttpPeer {
    // Includes the base path, e.g. "http://10.0.0.2:9100/_meshcache/".
    base_url: String,
    http_client: reqwest::Client,
    timeout: Duration,
}

impl HttpPeer {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            base_url,
            http_client: reqwest::Client::new(),
            timeout,
        }
    }

    async fn get_with_retry(&self, url: String) -> Result<reqwest::Response> {
        let mut delay_ms = 150u64;

        for attempt in 0..RETRY_ATTEMPTS {
            let response = self
                .http_client
                .get(url.clone())
                .timeout(self.timeout)
                .send()
                .await;

            match response {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if attempt + 1 == RETRY_ATTEMPTS {
                        return Err(anyhow!(e));
                    }
                    let jitter = rand::random::<u64>() % 50;
                    tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                    delay_ms = (delay_ms * 2).min(1200);
                }
            }
        }

        Err(anyhow!("Retry attempts exhausted"))
    }
}

#[async_trait]
impl PeerGetter for HttpPeer {
    async fn fetch(&self, group: &str, key: &str) -> Result<Vec<u8>> {
        let url = format!(
            "{}{}/{}",
            self.base_url,
            urlencoding::encode(group),
            urlencoding::encode(key)
        );

        let response = self.get_with_retry(url).await?;
        if !response.status().is_success() {
            return Err(anyhow!("peer returned {}", response.status()));
        }

        let body = response.bytes().await?;
        let decoded: FetchResponse =
            bincode::deserialize(&body).context("decoding peer response body")?;
        Ok(decoded.value)
    }
}
