//! DOM Tree (arena-based allocation)
//!
//! Slots are never reused while the tree lives. Detaching only unlinks;
//! `release` drops a detached subtree's contents but keeps its slots, so a
//! `NodeId` never names a different node later.

use crate::{DomError, DomResult, ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes ever allocated, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Element data for `id`, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    /// Mutable element data for `id`, if it is an element
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id)?.as_element_mut()
    }

    /// Element data or an error naming the node
    pub fn expect_element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        match self.get_mut(id) {
            Some(node) => node.as_element_mut().ok_or(DomError::InvalidNodeType(id)),
            None => Err(DomError::NotFound(id)),
        }
    }

    /// Lowercase tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached element with attributes
    pub fn create_element_with_attrs(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut node = Node::element(tag);
        if let Some(elem) = node.as_element_mut() {
            for (name, value) in attrs {
                elem.set_attr(name, *value);
            }
        }
        self.push(node)
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(Node::comment(text.to_string()))
    }

    /// Create a detached doctype node
    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.push(Node::doctype(name.into(), public_id.into(), system_id.into()))
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.to_option()
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while let Some(n) = self.get(current) {
            if current == ancestor {
                return true;
            }
            current = n.parent;
        }
        false
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.node(parent)?;
        self.node(child)?;
        let container = matches!(parent_node.data, NodeData::Element(_) | NodeData::Document);
        if !container || child == NodeId::ROOT || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    fn link(&mut self, parent: NodeId, child: NodeId, prev: NodeId, next: NodeId) {
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = child;
        } else {
            self.nodes[parent.index()].last_child = child;
        }
    }

    /// Unlink a node from its parent. Detached nodes are left as they are.
    pub fn detach(&mut self, id: NodeId) -> DomResult<()> {
        let node = self.node(id)?;
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return Ok(());
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        Ok(())
    }

    /// Append `child` as the last child of `parent`, moving it if attached
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.check_insert(parent, child)?;
        self.detach(child)?;
        let last = self.nodes[parent.index()].last_child;
        self.link(parent, child, last, NodeId::NONE);
        Ok(child)
    }

    /// Insert `child` as the first child of `parent`
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.check_insert(parent, child)?;
        self.detach(child)?;
        let first = self.nodes[parent.index()].first_child;
        self.link(parent, child, NodeId::NONE, first);
        Ok(child)
    }

    /// Insert `child` before `reference`, or append when there is no reference
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        let Some(reference) = reference else {
            return self.append_child(parent, child);
        };
        if self.parent(reference) != Some(parent) {
            return Err(DomError::HierarchyRequest { parent, child: reference });
        }
        self.check_insert(parent, child)?;
        if child == reference {
            return Ok(child);
        }
        self.detach(child)?;
        let prev = self.nodes[reference.index()].prev_sibling;
        self.link(parent, child, prev, reference);
        Ok(child)
    }

    /// Insert `child` directly after `reference` (`insertAdjacentElement('afterend')`)
    pub fn insert_after(&mut self, reference: NodeId, child: NodeId) -> DomResult<NodeId> {
        let parent = self.parent(reference).ok_or(DomError::Detached(reference))?;
        self.check_insert(parent, child)?;
        if child == reference {
            return Ok(child);
        }
        self.detach(child)?;
        let next = self.nodes[reference.index()].next_sibling;
        self.link(parent, child, reference, next);
        Ok(child)
    }

    /// Put `new` exactly where `old` is and detach `old`, in one step
    pub fn replace_node(&mut self, old: NodeId, new: NodeId) -> DomResult<()> {
        if old == new {
            return Ok(());
        }
        let parent = self.parent(old).ok_or(DomError::Detached(old))?;
        self.check_insert(parent, new)?;

        // `new` may be a sibling of `old`; unlink it before reading old's neighbours
        self.detach(new)?;
        let (prev, next) = {
            let node = &self.nodes[old.index()];
            (node.prev_sibling, node.next_sibling)
        };
        self.detach(old)?;
        self.link(parent, new, prev, next);
        Ok(())
    }

    /// Iterate over direct children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Direct children that are elements
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).filter(|(_, n)| n.is_element()).map(|(id, _)| id)
    }

    /// Pre-order traversal of everything below `id` (excluding `id`)
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Descendants { tree: self, root: id, next }
    }

    /// Parent chain starting at the parent of `id`
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Next sibling that is an element (`nextElementSibling`)
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.get(id)?.next_sibling;
        while let Some(node) = self.get(current) {
            if node.is_element() {
                return Some(current);
            }
            current = node.next_sibling;
        }
        None
    }

    /// Whether the node is reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(NodeId::ROOT, id)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        let children: Vec<NodeId> = self.children(id).map(|(child, _)| child).collect();
        for child in children {
            self.detach(child)?;
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node)?;
        }
        Ok(())
    }

    /// Deep-copy a subtree of another tree into this arena, detached
    pub fn import_subtree(&mut self, source: &DomTree, node: NodeId) -> DomResult<NodeId> {
        let data = match &source.node(node)?.data {
            NodeData::Document => return Err(DomError::InvalidNodeType(node)),
            NodeData::Element(elem) => NodeData::Element(elem.shallow_clone()),
            other => other.clone(),
        };
        let copy = self.push(Node::with_data(data));
        for (child, _) in source.children(node) {
            let imported = self.import_subtree(source, child)?;
            self.append_child(copy, imported)?;
        }
        Ok(copy)
    }

    /// Drop the contents of a detached subtree, leaving empty tombstones in
    /// its slots. Returns the number of nodes released.
    pub fn release(&mut self, id: NodeId) -> DomResult<usize> {
        let node = self.node(id)?;
        if id == NodeId::ROOT || node.parent.is_valid() {
            return Err(DomError::Attached(id));
        }
        let doomed: Vec<NodeId> = std::iter::once(id).chain(self.descendants(id)).collect();
        for &node in &doomed {
            self.nodes[node.index()] = Node::comment(String::new());
        }
        Ok(doomed.len())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over a subtree
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Descendants<'_> {
    fn following(&self, node: NodeId) -> NodeId {
        let Some(n) = self.tree.get(node) else {
            return NodeId::NONE;
        };
        if n.first_child.is_valid() {
            return n.first_child;
        }
        let mut current = node;
        while current != self.root {
            let Some(c) = self.tree.get(current) else {
                break;
            };
            if c.next_sibling.is_valid() {
                return c.next_sibling;
            }
            current = c.parent;
        }
        NodeId::NONE
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.to_option()?;
        self.next = self.following(current);
        Some(current)
    }
}
