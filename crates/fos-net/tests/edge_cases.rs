//! Edge case tests for fos-net
//!
//! Response handling and the in-memory fetcher.

use fos_net::*;

// ============================================================================
// RESPONSE TESTS
// ============================================================================

#[test]
fn test_response_success_codes() {
    for status in [200, 201, 204, 299] {
        assert!(FetchResponse::html("https://example.com", status, "").ok(), "{status}");
    }
}

#[test]
fn test_response_error_codes() {
    for status in [199, 300, 301, 404, 500, 503] {
        assert!(!FetchResponse::html("https://example.com", status, "").ok(), "{status}");
    }
}

#[test]
fn test_response_text_utf8() {
    let resp = FetchResponse::html("https://example.com", 200, "<h1>Formulário</h1>");
    assert_eq!(resp.text(), "<h1>Formulário</h1>");
}

#[test]
fn test_response_without_content_type() {
    let resp = FetchResponse::new(
        "https://example.com",
        Response { status: 200, headers: vec![], body: "<p>ação</p>".as_bytes().to_vec() },
    );
    assert_eq!(resp.text(), "<p>ação</p>");
}

#[test]
fn test_unknown_charset_falls_back_to_utf8() {
    let resp = FetchResponse::new(
        "https://example.com",
        Response {
            status: 200,
            headers: vec![("content-type".into(), "text/html; charset=x-nonsense".into())],
            body: "<p>pão</p>".as_bytes().to_vec(),
        },
    );
    assert_eq!(resp.text(), "<p>pão</p>");
}

#[test]
fn test_response_keeps_url() {
    let resp = FetchResponse::html("https://example.com/sobre", 200, "");
    assert_eq!(resp.url(), "https://example.com/sobre");
}

// ============================================================================
// ERROR TESTS
// ============================================================================

#[test]
fn test_net_error_display() {
    assert_eq!(NetError::Network("timeout".into()).to_string(), "Network error: timeout");
    assert_eq!(NetError::InvalidUrl("x".into()).to_string(), "Invalid URL: x");
}

// ============================================================================
// MEMORY FETCHER TESTS
// ============================================================================

#[test]
fn test_memory_route_replaced() {
    let fetcher = MemoryFetcher::new().with_page("https://site.test/", "old");
    fetcher.route("https://site.test/", 500, "new");

    let resp = smol::block_on(fetcher.fetch("https://site.test/")).unwrap();
    assert_eq!(resp.status(), 500);
    assert_eq!(resp.text(), "new");
}

#[test]
fn test_memory_latin1_page() {
    let fetcher = MemoryFetcher::new();
    fetcher.route_bytes("https://site.test/adocao", 200, "text/html; charset=ISO-8859-1", b"<main>Ado\xe7\xe3o</main>");

    let resp = smol::block_on(fetcher.fetch("https://site.test/adocao")).unwrap();
    assert!(resp.ok());
    assert_eq!(resp.text(), "<main>Adoção</main>");
}

#[test]
fn test_memory_exact_url_match() {
    let fetcher = MemoryFetcher::new().with_page("https://site.test/a", "a");
    let resp = smol::block_on(fetcher.fetch("https://site.test/a?x=1")).unwrap();
    assert_eq!(resp.status(), 404);
}

#[test]
fn test_resource_loader_new() {
    assert!(ResourceLoader::new().is_ok());
}
