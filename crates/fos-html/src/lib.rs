//! fOS HTML Parser
//!
//! HTML5 parser built on html5ever, producing `fos_dom::Document`s.

mod parser;

pub use fos_dom::Document;
pub use parser::HtmlParser;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse an HTML string fetched from `url`
pub fn parse_with_url(html: &str, url: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse_with_url(html, url)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("DOM construction failed: {0}")]
    Dom(#[from] fos_dom::DomError),
}
