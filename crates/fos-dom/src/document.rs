//! Document - High-level document API

use crate::{DomResult, DomTree, ElementMatcher, NodeId, SelectorList};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with an empty html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes under the root cannot violate the hierarchy
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate html/head/body after the tree was built externally
    pub fn finalize(&mut self) {
        let root = self.tree.root();
        self.html_element = self
            .tree
            .element_children(root)
            .find(|&id| self.tree.tag_name(id) == Some("html"))
            .unwrap_or(NodeId::NONE);

        let html = self.html_element;
        let child_named = |tag: &str| {
            self.tree
                .element_children(html)
                .find(|&id| self.tree.tag_name(id) == Some(tag))
                .unwrap_or(NodeId::NONE)
        };
        let head = child_named("head");
        let body = child_named("body");
        self.head_element = head;
        self.body_element = body;
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Update the document URL (after navigation)
    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.tree
            .element_children(self.head_element)
            .find(|&id| self.tree.tag_name(id) == Some("title"))
            .map(|id| self.tree.text_content(id).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID (connected elements only)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .find(|&node| self.tree.element(node).and_then(|e| e.id()) == Some(id))
    }

    /// First element below `root` matching `matcher`
    pub fn query_selector<M>(&self, root: NodeId, matcher: &M) -> Option<NodeId>
    where
        M: ElementMatcher + ?Sized,
    {
        self.tree
            .descendants(root)
            .find(|&node| self.element_matches(node, matcher))
    }

    /// All elements below `root` matching `matcher`, in document order
    pub fn query_selector_all<M>(&self, root: NodeId, matcher: &M) -> Vec<NodeId>
    where
        M: ElementMatcher + ?Sized,
    {
        self.tree
            .descendants(root)
            .filter(|&node| self.element_matches(node, matcher))
            .collect()
    }

    /// Parse `selector` and collect its matches below `root`
    pub fn select(&self, root: NodeId, selector: &str) -> DomResult<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self.query_selector_all(root, &list))
    }

    /// Nearest inclusive ancestor matching `matcher` (`Element.closest`)
    pub fn closest<M>(&self, node: NodeId, matcher: &M) -> Option<NodeId>
    where
        M: ElementMatcher + ?Sized,
    {
        std::iter::once(node)
            .chain(self.tree.ancestors(node))
            .find(|&id| self.element_matches(id, matcher))
    }

    /// Whether `node` is an element matching `matcher`
    pub fn element_matches<M>(&self, node: NodeId, matcher: &M) -> bool
    where
        M: ElementMatcher + ?Sized,
    {
        self.tree.element(node).is_some_and(|e| matcher.matches(e))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Selector;

    fn sample() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new("https://example.com/");
        let body = doc.body();
        let main = doc.tree.create_element_with_attrs("main", &[("id", "content")]);
        let link = doc.tree.create_element_with_attrs("a", &[("href", "/contato")]);
        let span = doc.tree.create_element("span");
        doc.tree.append_child(body, main).unwrap();
        doc.tree.append_child(main, link).unwrap();
        doc.tree.append_child(link, span).unwrap();
        (doc, link, span)
    }

    #[test]
    fn test_skeleton() {
        let doc = Document::default();
        assert!(doc.document_element().is_valid());
        assert!(doc.head().is_valid());
        assert!(doc.body().is_valid());
        assert_eq!(doc.url(), "about:blank");
    }

    #[test]
    fn test_get_element_by_id() {
        let (doc, _, _) = sample();
        let main = doc.get_element_by_id("content").unwrap();
        assert_eq!(doc.tree().tag_name(main), Some("main"));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }

    #[test]
    fn test_closest_is_inclusive() {
        let (doc, link, span) = sample();
        let a = Selector::tag("a");
        assert_eq!(doc.closest(span, &a), Some(link));
        assert_eq!(doc.closest(link, &a), Some(link));
        assert_eq!(doc.closest(doc.body(), &a), None);
    }

    #[test]
    fn test_query_scoping() {
        let (doc, link, _) = sample();
        let main = doc.get_element_by_id("content").unwrap();
        assert_eq!(doc.query_selector(main, &Selector::tag("a")), Some(link));
        // the scope root itself is never a match
        assert_eq!(doc.query_selector(main, &Selector::tag("main")), None);
        assert_eq!(doc.select(doc.tree().root(), "main, span").unwrap().len(), 2);
    }

    #[test]
    fn test_finalize_after_manual_build() {
        let mut doc = Document::empty("about:blank");
        let html = doc.tree.create_element("html");
        let head = doc.tree.create_element("head");
        let title = doc.tree.create_element("title");
        let text = doc.tree.create_text(" Contato ");
        let root = doc.tree.root();
        doc.tree.append_child(root, html).unwrap();
        doc.tree.append_child(html, head).unwrap();
        doc.tree.append_child(head, title).unwrap();
        doc.tree.append_child(title, text).unwrap();

        doc.finalize();
        assert_eq!(doc.head(), head);
        assert!(!doc.body().is_valid());
        assert_eq!(doc.title(), "Contato");
    }
}
