//! In-memory fetcher
//!
//! Serves canned responses keyed by absolute URL. Used by embedders that
//! already hold their pages and by tests.

use crate::{FetchResponse, Fetcher, NetError, Response};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone)]
enum Route {
    Respond(Response),
    Fail(String),
}

#[derive(Debug, Default)]
struct Inner {
    routes: HashMap<String, Route>,
    requests: Vec<String>,
}

/// Fetcher backed by a route table. Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` with status 200 at `url`
    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.route(url, 200, html);
        self
    }

    /// Serve `body` with `status` at `url`, replacing any previous route
    pub fn route(&self, url: &str, status: u16, body: &str) {
        self.route_bytes(url, status, "text/html; charset=utf-8", body.as_bytes());
    }

    /// Serve raw `body` bytes labelled with `content_type`
    pub fn route_bytes(&self, url: &str, status: u16, content_type: &str, body: &[u8]) {
        let response = Response {
            status,
            headers: vec![("Content-Type".into(), content_type.to_string())],
            body: body.to_vec(),
        };
        self.lock().routes.insert(url.to_string(), Route::Respond(response));
    }

    /// Make requests for `url` fail at the network level
    pub fn fail(&self, url: &str, reason: &str) {
        self.lock().routes.insert(url.to_string(), Route::Fail(reason.to_string()));
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Fetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, NetError> {
        let route = {
            let mut inner = self.lock();
            inner.requests.push(url.to_string());
            inner.routes.get(url).cloned()
        };
        tracing::debug!("memory fetch {}", url);

        match route {
            Some(Route::Respond(response)) => Ok(FetchResponse::new(url, response)),
            Some(Route::Fail(reason)) => Err(NetError::Network(reason)),
            None => Ok(FetchResponse::html(url, 404, "Not Found")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_route() {
        let fetcher = MemoryFetcher::new().with_page("https://site.test/a", "<main>A</main>");
        let resp = smol::block_on(fetcher.fetch("https://site.test/a")).unwrap();
        assert!(resp.ok());
        assert_eq!(resp.text(), "<main>A</main>");
    }

    #[test]
    fn test_unknown_route_is_404() {
        let fetcher = MemoryFetcher::new();
        let resp = smol::block_on(fetcher.fetch("https://site.test/missing")).unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[test]
    fn test_failure_and_request_log() {
        let fetcher = MemoryFetcher::new();
        fetcher.fail("https://site.test/down", "connection refused");
        let clone = fetcher.clone();

        let err = smol::block_on(clone.fetch("https://site.test/down")).unwrap_err();
        assert!(matches!(err, NetError::Network(_)));
        assert_eq!(fetcher.requests(), vec!["https://site.test/down".to_string()]);
    }
}
