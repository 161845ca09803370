//! Edge case tests for fos-html
//!
//! Malformed or partial pages must still produce a usable document.

use fos_dom::Selector;
use fos_html::{parse, parse_with_url};

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_parse_empty() {
    let doc = parse("").unwrap();
    // html5ever always synthesizes html/head/body
    assert!(doc.body().is_valid());
}

#[test]
fn test_parse_only_whitespace() {
    let doc = parse("   \t\n\r\n   ").unwrap();
    assert!(doc.body().is_valid());
}

#[test]
fn test_parse_only_doctype() {
    let doc = parse("<!DOCTYPE html>").unwrap();
    assert!(doc.head().is_valid());
}

// ============================================================================
// MALFORMED HTML
// ============================================================================

#[test]
fn test_parse_unclosed_main() {
    let doc = parse("<main><form><input required>").unwrap();
    let main = doc.query_selector(doc.tree().root(), &Selector::tag("main")).unwrap();
    assert!(doc.query_selector(main, &Selector::tag("input")).is_some());
}

#[test]
fn test_parse_page_without_main() {
    let doc = parse("<html><body><div>Sem conteúdo principal</div></body></html>").unwrap();
    assert!(doc.query_selector(doc.tree().root(), &Selector::tag("main")).is_none());
}

#[test]
fn test_parse_uppercase_tags_and_attrs() {
    let doc = parse(r#"<MAIN><INPUT TYPE="email" NAME="Email"></MAIN>"#).unwrap();
    let input = doc.query_selector(doc.tree().root(), &Selector::tag("input")).unwrap();
    let elem = doc.tree().element(input).unwrap();
    assert_eq!(elem.tag, "input");
    assert_eq!(elem.get_attr("type"), Some("email"));
    // attribute values keep their case
    assert_eq!(elem.get_attr("name"), Some("Email"));
}

#[test]
fn test_parse_null_bytes() {
    let doc = parse("Hello\0World").unwrap();
    assert!(doc.tree().len() > 1);
}

#[test]
fn test_parse_keeps_url() {
    let doc = parse_with_url("<main></main>", "https://example.com/sobre").unwrap();
    assert_eq!(doc.url(), "https://example.com/sobre");
}
