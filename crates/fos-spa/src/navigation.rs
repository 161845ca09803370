//! Navigation Controller
//!
//! Decides which clicks and history moves become in-page navigations.

use crate::history::PopState;
use fos_dom::dom_events::DomEvent;
use fos_dom::{Document, NodeId, Selector};

/// How a navigation updates history once it completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Link click: push a new entry
    Fresh,
    /// History move: replace the current entry
    Replay,
}

/// A navigation the page should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub href: String,
    pub mode: NavigationMode,
}

/// Whether `href` stays inside the site. Empty and missing hrefs do not.
pub fn is_internal_link<S: AsRef<str>>(href: Option<&str>, external_prefixes: &[S]) -> bool {
    match href {
        None | Some("") => false,
        Some(href) => !external_prefixes.iter().any(|p| href.starts_with(p.as_ref())),
    }
}

/// Nearest `a` element at or above `target`
pub fn link_for(doc: &Document, target: NodeId) -> Option<NodeId> {
    doc.closest(target, &Selector::tag("a"))
}

/// Handle a click that reached `body`. Internal links have their default
/// action prevented and turn into a fresh navigation.
pub fn handle_click<S: AsRef<str>>(
    doc: &Document,
    event: &mut DomEvent,
    external_prefixes: &[S],
) -> Option<NavigationRequest> {
    let link = link_for(doc, event.target)?;
    let href = doc.tree.element(link).and_then(|e| e.get_attr("href"));
    if !is_internal_link(href, external_prefixes) {
        return None;
    }
    let href = href?.to_string();

    event.prevent_default();
    tracing::debug!("Intercepted link to {}", href);
    Some(NavigationRequest { href, mode: NavigationMode::Fresh })
}

/// Handle `popstate`. Only states carrying a URL are replayed.
pub fn handle_pop_state(event: &PopState) -> Option<NavigationRequest> {
    let state = event.state.as_ref().filter(|s| !s.url.is_empty())?;
    Some(NavigationRequest { href: state.url.clone(), mode: NavigationMode::Replay })
}
