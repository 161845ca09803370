//! DOM Node
//!
//! Nodes link to each other through `NodeId` indices instead of pointers,
//! so a detached subtree stays addressable until the arena is dropped.

use crate::{DOMTokenList, NodeId};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    pub(crate) fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: String) -> Self {
        Self::with_data(NodeData::Text(content))
    }

    /// Create a comment node
    pub fn comment(content: String) -> Self {
        Self::with_data(NodeData::Comment(content))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Create a doctype node
    pub fn doctype(name: String, public_id: String, system_id: String) -> Self {
        Self::with_data(NodeData::Doctype { name, public_id, system_id })
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercase local tag name
    pub tag: String,
    /// Attributes in source order
    pub attrs: Vec<Attribute>,
    /// Live value of a form control, `None` while it still shows its default
    pub(crate) dirty_value: Option<String>,
    /// Live checkedness of a checkbox/radio, `None` while it still shows its default
    pub(crate) dirty_checked: Option<bool>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            dirty_value: None,
            dirty_checked: None,
        }
    }

    /// Check the tag name (case-insensitive)
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Check attribute presence
    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    /// Set an attribute, replacing an existing value
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name.eq_ignore_ascii_case(name)) {
            attr.value = value;
            return;
        }
        self.attrs.push(Attribute { name: name.to_ascii_lowercase(), value });
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|a| a.name.eq_ignore_ascii_case(name))?;
        Some(self.attrs.remove(pos).value)
    }

    /// The `id` attribute, if non-empty
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id").filter(|id| !id.is_empty())
    }

    /// Snapshot of the `class` attribute as a token list
    pub fn class_list(&self) -> DOMTokenList {
        DOMTokenList::from_string(self.get_attr("class").unwrap_or_default())
    }

    /// Check for a class token
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Add class tokens
    pub fn add_class(&mut self, classes: &[&str]) {
        let mut list = self.class_list();
        list.add(classes);
        self.set_attr("class", list.value());
    }

    /// Remove class tokens; drops the attribute when it becomes empty
    pub fn remove_class(&mut self, classes: &[&str]) {
        if !self.has_attr("class") {
            return;
        }
        let mut list = self.class_list();
        list.remove(classes);
        if list.length() == 0 {
            self.remove_attr("class");
        } else {
            self.set_attr("class", list.value());
        }
    }

    /// Copy of this element without its live form state
    pub(crate) fn shallow_clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            attrs: self.attrs.clone(),
            dirty_value: None,
            dirty_checked: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_roundtrip() {
        let mut elem = ElementData::new("INPUT");
        assert_eq!(elem.tag, "input");

        elem.set_attr("Type", "email");
        assert_eq!(elem.get_attr("type"), Some("email"));

        elem.set_attr("type", "text");
        assert_eq!(elem.attrs.len(), 1);
        assert_eq!(elem.remove_attr("TYPE"), Some("text".to_string()));
        assert!(!elem.has_attr("type"));
    }

    #[test]
    fn test_class_helpers() {
        let mut elem = ElementData::new("div");
        elem.add_class(&["spa-global-alert", "spa-alert-error"]);
        assert!(elem.has_class("spa-alert-error"));

        elem.add_class(&["spa-global-alert"]);
        assert_eq!(elem.get_attr("class"), Some("spa-global-alert spa-alert-error"));

        elem.remove_class(&["spa-global-alert", "spa-alert-error"]);
        assert!(!elem.has_attr("class"));
    }

    #[test]
    fn test_empty_id_is_none() {
        let mut elem = ElementData::new("form");
        elem.set_attr("id", "");
        assert_eq!(elem.id(), None);
    }
}
