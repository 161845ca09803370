//! Event listeners
//!
//! The page's handlers are a closed set of behaviors bound to elements.
//! Each (element, event, behavior) binding exists at most once, so running
//! the initialization pass again never doubles a handler.

use fos_dom::NodeId;
use fos_dom::dom_events::DomEventType;
use std::collections::HashSet;

/// What a listener does when its event arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Delegated link interception on `body`
    InterceptLinks,
    /// Validate the form on submit
    ValidateForm,
    /// Validate the field on blur
    ValidateField,
    /// Drop the field's annotation on input
    ClearFieldError,
    /// Submit the enclosing form on click
    RequestSubmit(NodeId),
    /// Cycle the theme on click
    ToggleTheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Binding {
    node: NodeId,
    event: DomEventType,
    behavior: Behavior,
}

/// Listener table in registration order
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    bindings: Vec<Binding>,
    seen: HashSet<Binding>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a behavior. Returns `false` if it was already bound.
    pub fn add(&mut self, node: NodeId, event: DomEventType, behavior: Behavior) -> bool {
        let binding = Binding { node, event, behavior };
        if !self.seen.insert(binding) {
            return false;
        }
        self.bindings.push(binding);
        true
    }

    /// Behaviors bound to `node` for `event`, in registration order
    pub fn listeners(&self, node: NodeId, event: DomEventType) -> Vec<Behavior> {
        self.bindings
            .iter()
            .filter(|b| b.node == node && b.event == event)
            .map(|b| b.behavior)
            .collect()
    }

    /// Whether `node` has any listener for `event`
    pub fn has(&self, node: NodeId, event: DomEventType) -> bool {
        self.bindings.iter().any(|b| b.node == node && b.event == event)
    }

    /// Drop bindings whose node fails `keep`. Returns how many were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(NodeId) -> bool) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|b| keep(b.node));
        self.seen = self.bindings.iter().copied().collect();
        before - self.bindings.len()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
