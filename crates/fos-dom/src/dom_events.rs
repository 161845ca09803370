//! DOM Events
//!
//! User-interaction events delivered to page scripts.

use crate::{DomTree, NodeId};

/// DOM event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventType {
    Click,
    Submit,
    /// Focus loss; does not bubble
    Blur,
    /// Value change while typing
    Input,
    DOMContentLoaded,
}

impl DomEventType {
    /// Event name as used by `addEventListener`
    pub fn name(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
            Self::Blur => "blur",
            Self::Input => "input",
            Self::DOMContentLoaded => "DOMContentLoaded",
        }
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub event_type: DomEventType,
    pub target: NodeId,
    pub current_target: Option<NodeId>,
    pub bubbles: bool,
    pub cancelable: bool,
    pub timestamp: f64,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl DomEvent {
    fn new(event_type: DomEventType, target: NodeId, bubbles: bool, cancelable: bool) -> Self {
        Self {
            event_type,
            target,
            current_target: None,
            bubbles,
            cancelable,
            timestamp: 0.0,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create click event
    pub fn click(target: NodeId) -> Self {
        Self::new(DomEventType::Click, target, true, true)
    }

    /// Create submit event
    pub fn submit(form: NodeId) -> Self {
        Self::new(DomEventType::Submit, form, true, true)
    }

    /// Create blur event
    pub fn blur(target: NodeId) -> Self {
        Self::new(DomEventType::Blur, target, false, false)
    }

    /// Create input event
    pub fn input(target: NodeId) -> Self {
        Self::new(DomEventType::Input, target, true, false)
    }

    /// Create DOMContentLoaded event
    pub fn content_loaded(target: NodeId) -> Self {
        Self::new(DomEventType::DOMContentLoaded, target, true, false)
    }

    /// Stamp the event with the host clock (milliseconds)
    pub fn at(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Check if propagation was stopped
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Nodes the event visits: the target, then its ancestors when it bubbles
    pub fn propagation_path(&self, tree: &DomTree) -> Vec<NodeId> {
        let mut path = vec![self.target];
        if self.bubbles {
            path.extend(tree.ancestors(self.target));
        }
        path
    }
}

/// Event dispatcher trait
pub trait EventDispatcher {
    /// Deliver an event; returns `false` when its default action was prevented
    fn dispatch_event(&mut self, event: DomEvent) -> bool;
}
