//! Fetch
//!
//! The `Fetcher` seam page scripts use and the buffered response it returns.

use crate::{NetError, Response};
use encoding_rs::Encoding;
use std::future::Future;

/// Something that can retrieve a document by URL
pub trait Fetcher {
    /// GET `url` (absolute) and buffer the whole response
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchResponse, NetError>>;
}

/// Buffered fetch response
#[derive(Debug, Clone)]
pub struct FetchResponse {
    url: String,
    inner: Response,
}

impl FetchResponse {
    pub fn new(url: &str, inner: Response) -> Self {
        Self { url: url.to_string(), inner }
    }

    /// Shorthand for a UTF-8 HTML response
    pub fn html(url: &str, status: u16, body: &str) -> Self {
        Self::new(
            url,
            Response {
                status,
                headers: vec![("Content-Type".into(), "text/html; charset=utf-8".into())],
                body: body.as_bytes().to_vec(),
            },
        )
    }

    /// URL the response was fetched from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.inner.status
    }

    /// Check if response is OK (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.inner.status)
    }

    /// Get header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner
            .headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body decoded with the `Content-Type` charset, UTF-8 otherwise.
    /// Malformed sequences become U+FFFD.
    pub fn text(&self) -> String {
        let encoding = self
            .header("content-type")
            .and_then(charset)
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .unwrap_or(encoding_rs::UTF_8);
        let (text, _, malformed) = encoding.decode(&self.inner.body);
        if malformed {
            tracing::warn!("{} has malformed {} bytes", self.url, encoding.name());
        }
        text.into_owned()
    }
}

fn charset(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}
