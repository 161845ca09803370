//! Page Loader
//!
//! Fetches a page, parses it and swaps its content container into the
//! live document. Each navigation carries a ticket; only the newest one
//! may touch the page, so an older response that arrives late is dropped.

use crate::error::LoadError;
use crate::navigation::NavigationMode;
use fos_dom::{Document, NodeId, SelectorList};
use fos_net::{FetchResponse, Fetcher, NetError, Url};

/// Loader state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Fetching,
    Parsing,
    Swapping,
    Reinitializing,
}

/// Navigation generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// A navigation that has been started but not fetched yet
#[derive(Debug, Clone)]
pub struct PendingNavigation {
    pub ticket: Ticket,
    /// The href as requested (stored in history state)
    pub href: String,
    /// `href` resolved against the document URL
    pub url: Url,
    pub mode: NavigationMode,
}

impl PendingNavigation {
    /// Perform the request. Needs only the fetcher, so several navigations
    /// may be in flight at once.
    pub async fn fetch<F: Fetcher>(self, fetcher: &F) -> FetchedPage {
        let response = fetcher.fetch(self.url.as_str()).await;
        FetchedPage { navigation: self, response }
    }
}

/// Result of [`PendingNavigation::fetch`]
#[derive(Debug)]
pub struct FetchedPage {
    pub navigation: PendingNavigation,
    pub response: Result<FetchResponse, NetError>,
}

/// What [`PageLoader::swap`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The new container is live
    Swapped { content: NodeId },
    /// A newer navigation was started; nothing was touched
    Stale,
}

/// Content swap state machine
#[derive(Debug)]
pub struct PageLoader {
    state: LoadState,
    issued: u64,
    content_selector: String,
    content: SelectorList,
}

impl PageLoader {
    pub fn new(content_selector: &str, content: SelectorList) -> Self {
        Self {
            state: LoadState::Idle,
            issued: 0,
            content_selector: content_selector.to_string(),
            content,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Selector of the swapped container
    pub fn content_selector(&self) -> &str {
        &self.content_selector
    }

    /// The container in `doc`, if any
    pub fn find_content(&self, doc: &Document) -> Option<NodeId> {
        doc.query_selector(doc.tree.root(), &self.content)
    }

    /// Whether `ticket` belongs to the newest navigation
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Resolve `href` against `base` and issue a new ticket
    pub fn begin(&mut self, base: &str, href: &str, mode: NavigationMode) -> Result<PendingNavigation, LoadError> {
        let url = resolve(base, href)?;
        self.issued += 1;
        self.set_state(LoadState::Fetching);
        tracing::info!("Navigating to {} ({:?})", url, mode);

        Ok(PendingNavigation {
            ticket: Ticket(self.issued),
            href: href.to_string(),
            url,
            mode,
        })
    }

    /// Parse the fetched page and replace the live container with its
    /// container. On error the live document is untouched.
    pub fn swap(&mut self, doc: &mut Document, fetched: FetchedPage) -> Result<SwapOutcome, LoadError> {
        let FetchedPage { navigation, response } = fetched;
        if !self.is_current(navigation.ticket) {
            tracing::debug!("Dropping stale response for {}", navigation.url);
            return Ok(SwapOutcome::Stale);
        }
        let url = navigation.url.as_str();

        let response = response?;
        self.set_state(LoadState::Parsing);
        if !response.ok() {
            return Err(LoadError::HttpStatus { url: url.to_string(), status: response.status() });
        }
        let html = response.text();
        let fetched_doc = fos_html::parse_with_url(&html, url)
            .map_err(|source| LoadError::Parse { url: url.to_string(), source })?;
        let new_content = self.find_content(&fetched_doc).ok_or_else(|| LoadError::MissingContent {
            url: url.to_string(),
            selector: self.content_selector.clone(),
        })?;

        self.set_state(LoadState::Swapping);
        let live = self
            .find_content(doc)
            .ok_or_else(|| LoadError::MissingLiveContent { selector: self.content_selector.clone() })?;
        let imported = doc.tree.import_subtree(fetched_doc.tree(), new_content)?;
        doc.tree.replace_node(live, imported)?;
        let released = doc.tree.release(live)?;
        tracing::debug!("Released {} nodes of the old content", released);
        doc.set_url(url);

        self.set_state(LoadState::Reinitializing);
        Ok(SwapOutcome::Swapped { content: imported })
    }

    /// Back to idle once the newest navigation has finished or failed
    pub fn finish(&mut self, ticket: Ticket) {
        if self.is_current(ticket) {
            self.set_state(LoadState::Idle);
        }
    }

    fn set_state(&mut self, state: LoadState) {
        if self.state != state {
            tracing::debug!("Loader {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}

/// Resolve `href` against the document URL
pub fn resolve(base: &str, href: &str) -> Result<Url, LoadError> {
    let invalid = |reason: String| LoadError::InvalidUrl {
        href: href.to_string(),
        base: base.to_string(),
        reason,
    };
    let base = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    base.join(href).map_err(|e| invalid(e.to_string()))
}
