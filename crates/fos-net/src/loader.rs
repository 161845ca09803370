//! Resource Loader
//!
//! GET requests through reqwest's blocking client. The blocking call runs
//! on smol's thread pool so callers only ever see a future.

use crate::{FetchResponse, Fetcher, NetError, Response};
use url::Url;

/// Load pages from the network
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    client: reqwest::blocking::Client,
}

impl ResourceLoader {
    pub const USER_AGENT: &'static str = "fOS-Engine/0.1";

    /// Build a loader with the default user agent
    pub fn new() -> Result<Self, NetError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(Self::USER_AGENT)
            .build()
            .map_err(|e| NetError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    /// GET an absolute URL
    pub async fn get(&self, url: &str) -> Result<Response, NetError> {
        tracing::info!("HTTP GET {}", url);

        let url = Url::parse(url).map_err(|e| NetError::InvalidUrl(format!("{}: {}", url, e)))?;
        let client = self.client.clone();
        smol::unblock(move || send_blocking(&client, url)).await
    }
}

fn send_blocking(client: &reqwest::blocking::Client, url: Url) -> Result<Response, NetError> {
    let response = client.get(url).send().map_err(|e| NetError::Network(e.to_string()))?;
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
        .collect();
    let body = response.bytes().map_err(|e| NetError::Network(e.to_string()))?.to_vec();

    tracing::debug!("HTTP {} ({} bytes)", status, body.len());
    Ok(Response { status, headers, body })
}

impl Fetcher for ResourceLoader {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, NetError> {
        let response = self.get(url).await?;
        Ok(FetchResponse::new(url, response))
    }
}
