//! Page session
//!
//! The live document together with everything the page scripts keep
//! around it: history, alerts, timers, listeners and the loader.

use crate::alert::{AlertKind, AlertManager, AlertTask};
use crate::config::SpaConfig;
use crate::error::{LoadError, PageError};
use crate::history::{HistoryManager, HistoryState, PopState};
use crate::listeners::{Behavior, ListenerRegistry};
use crate::loader::{FetchedPage, LoadState, PageLoader, PendingNavigation, SwapOutcome};
use crate::navigation::{self, NavigationMode, NavigationRequest};
use crate::styles;
use crate::theme::{ThemeCycler, ThemeMode};
use crate::timers::TimerQueue;
use fos_dom::dom_events::{DomEvent, DomEventType, EventDispatcher};
use fos_dom::{Document, DomResult, NodeId, Selector, SelectorList};
use fos_forms::FormReport;
use fos_net::Fetcher;

/// Alert shown when a navigation fails
pub const LOAD_ERROR_MESSAGE: &str = "Erro ao carregar a página.";
/// Alert shown after a valid submission
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Formulário enviado com sucesso!";
/// Alert shown when a submission has errors
pub const SUBMIT_ERROR_MESSAGE: &str = "Existem erros no formulário. Verifique os campos em destaque.";

/// How a navigation ended
#[derive(Debug)]
pub enum NavigationOutcome {
    /// The content was swapped and history updated
    Swapped { url: String },
    /// Nothing changed except for the error alert
    Failed(LoadError),
    /// A newer navigation superseded this one
    Stale,
}

impl NavigationOutcome {
    pub fn is_swapped(&self) -> bool {
        matches!(self, Self::Swapped { .. })
    }
}

/// How a submission ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submission was intercepted and validated
    Validated(FormReport),
    /// No handler intercepted it; the browser would submit natively
    NotIntercepted,
}

/// Result of a click
#[derive(Debug)]
pub struct ClickOutcome {
    pub default_prevented: bool,
    pub navigation: Option<NavigationOutcome>,
}

/// A live page and its script state
pub struct Page<F: Fetcher> {
    doc: Document,
    fetcher: F,
    config: SpaConfig,
    submit_buttons: SelectorList,
    history: HistoryManager,
    alerts: AlertManager,
    timers: TimerQueue<AlertTask>,
    loader: PageLoader,
    listeners: ListenerRegistry,
    theme: ThemeCycler,
    queued: Option<NavigationRequest>,
    pending_submits: Vec<NodeId>,
    last_report: Option<FormReport>,
    last_field_result: Option<bool>,
    forms_named: u64,
    init_passes: usize,
}

impl<F: Fetcher> Page<F> {
    /// Wrap a parsed document. Call [`Page::init`] to bind handlers.
    pub fn new(doc: Document, fetcher: F, config: SpaConfig) -> Result<Self, PageError> {
        config.validate()?;
        let loader = PageLoader::new(&config.content_selector, config.content_matcher()?);
        let submit_buttons = SelectorList::parse(&config.submit_button_selector)?;

        Ok(Self {
            history: HistoryManager::new(doc.url()),
            alerts: AlertManager::new(config.alert),
            doc,
            fetcher,
            submit_buttons,
            config,
            timers: TimerQueue::new(),
            loader,
            listeners: ListenerRegistry::new(),
            theme: ThemeCycler::new(),
            queued: None,
            pending_submits: Vec::new(),
            last_report: None,
            last_field_result: None,
            forms_named: 0,
            init_passes: 0,
        })
    }

    /// Parse `html` served from `url` into a new page
    pub fn from_html(html: &str, url: &str, fetcher: F, config: SpaConfig) -> Result<Self, PageError> {
        let doc = fos_html::parse_with_url(html, url)?;
        Self::new(doc, fetcher, config)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn config(&self) -> &SpaConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn load_state(&self) -> LoadState {
        self.loader.state()
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// The alert element currently shown
    pub fn current_alert(&self) -> Option<NodeId> {
        self.alerts.current()
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme.mode()
    }

    /// Virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// How many times the initialization pass has run
    pub fn init_passes(&self) -> usize {
        self.init_passes
    }

    /// DOMContentLoaded: inject styles, intercept links, bind forms and
    /// the theme toggle
    pub fn init(&mut self) -> DomResult<()> {
        styles::inject_styles(&mut self.doc)?;

        let body = self.doc.body();
        if body.is_valid() {
            self.listeners.add(body, DomEventType::Click, Behavior::InterceptLinks);
        }
        self.init_page()?;

        if let Some(button) = self.doc.get_element_by_id(&self.config.theme_toggle_id) {
            self.listeners.add(button, DomEventType::Click, Behavior::ToggleTheme);
        }
        tracing::info!("Page initialized: {}", self.doc.url());
        Ok(())
    }

    /// Bind every form and submit button in the document. Safe to repeat;
    /// elements that are already bound are skipped.
    pub fn init_page(&mut self) -> DomResult<()> {
        self.init_passes += 1;
        let root = self.doc.tree.root();

        for form in self.doc.query_selector_all(root, &Selector::tag("form")) {
            if self.doc.tree.element(form).and_then(|e| e.id()).is_none() {
                let id = self.next_form_id();
                self.doc.tree.expect_element_mut(form)?.set_attr("id", id);
            }
            self.listeners.add(form, DomEventType::Submit, Behavior::ValidateForm);
            for field in fos_forms::live_fields(&self.doc, form)? {
                self.listeners.add(field, DomEventType::Blur, Behavior::ValidateField);
                self.listeners.add(field, DomEventType::Input, Behavior::ClearFieldError);
            }
        }

        for button in self.doc.query_selector_all(root, &self.submit_buttons) {
            let Some(form) = self.doc.closest(button, &Selector::tag("form")) else {
                continue;
            };
            self.listeners.add(button, DomEventType::Click, Behavior::RequestSubmit(form));
        }

        tracing::debug!("Init pass {} bound {} listeners", self.init_passes, self.listeners.len());
        Ok(())
    }

    /// `form-` followed by seven base-36 characters, unique in the document
    fn next_form_id(&mut self) -> String {
        loop {
            self.forms_named += 1;
            let id = form_id(self.forms_named);
            if self.doc.get_element_by_id(&id).is_none() {
                return id;
            }
        }
    }

    // ------------------------------------------------------------------
    // User input
    // ------------------------------------------------------------------

    /// Click `target`: run listeners, then the default action, then any
    /// navigation a listener requested
    pub async fn click(&mut self, target: NodeId) -> ClickOutcome {
        let proceed = self.dispatch_event(DomEvent::click(target).at(self.now() as f64));

        for form in std::mem::take(&mut self.pending_submits) {
            self.request_submit(form);
        }
        if proceed {
            self.activate(target);
        }

        let navigation = self.run_pending_navigation().await;
        ClickOutcome { default_prevented: !proceed, navigation }
    }

    /// Submit-button activation: clicking a submit control submits its form
    fn activate(&mut self, target: NodeId) {
        let Some(control) = self.doc.closest(target, &SelectorList::new(vec![Selector::tag("button"), Selector::tag("input")]))
        else {
            return;
        };
        let is_submit = match self.doc.tree.tag_name(control) {
            Some("button") => matches!(self.doc.tree.element(control).and_then(|e| e.get_attr("type")), None | Some("submit")),
            _ => self.doc.tree.control_type(control) == "submit",
        };
        if !is_submit {
            return;
        }
        if let Some(form) = self.doc.closest(control, &Selector::tag("form")) {
            self.submit(form);
        }
    }

    /// Focus leaves `field`. Returns the validation result when a
    /// validator is bound to it.
    pub fn blur(&mut self, field: NodeId) -> Option<bool> {
        self.last_field_result = None;
        self.dispatch_event(DomEvent::blur(field).at(self.now() as f64));
        self.last_field_result.take()
    }

    /// The user changes the value of `field`
    pub fn input(&mut self, field: NodeId, value: &str) -> DomResult<()> {
        self.doc.tree.set_control_value(field, value)?;
        self.dispatch_event(DomEvent::input(field).at(self.now() as f64));
        Ok(())
    }

    /// The user ticks or unticks a checkbox/radio
    pub fn set_checked(&mut self, field: NodeId, checked: bool) -> DomResult<()> {
        self.doc.tree.set_checked(field, checked)?;
        self.dispatch_event(DomEvent::input(field).at(self.now() as f64));
        Ok(())
    }

    /// Fire `submit` at `form`
    pub fn submit(&mut self, form: NodeId) -> SubmitOutcome {
        self.last_report = None;
        self.dispatch_event(DomEvent::submit(form).at(self.now() as f64));
        match self.last_report.take() {
            Some(report) => SubmitOutcome::Validated(report),
            None => SubmitOutcome::NotIntercepted,
        }
    }

    /// `form.requestSubmit()`. `None` if `form` is not a form element.
    pub fn request_submit(&mut self, form: NodeId) -> Option<SubmitOutcome> {
        if self.doc.tree.tag_name(form) != Some("form") {
            tracing::warn!("requestSubmit on non-form {}", form);
            return None;
        }
        Some(self.submit(form))
    }

    /// Cycle the theme and update the toggle button
    pub fn toggle_theme(&mut self) -> ThemeMode {
        let button = self.doc.get_element_by_id(&self.config.theme_toggle_id);
        match self.theme.toggle(&mut self.doc, button) {
            Ok(mode) => mode,
            Err(e) => {
                tracing::warn!("Theme toggle failed: {}", e);
                self.theme.mode()
            }
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Browser back button
    pub async fn back(&mut self) -> Option<NavigationOutcome> {
        let event = self.history.back()?;
        self.pop_state(event).await
    }

    /// Browser forward button
    pub async fn forward(&mut self) -> Option<NavigationOutcome> {
        let event = self.history.forward()?;
        self.pop_state(event).await
    }

    /// `popstate`: replay navigations that carry a URL
    pub async fn pop_state(&mut self, event: PopState) -> Option<NavigationOutcome> {
        let request = navigation::handle_pop_state(&event)?;
        Some(self.navigate(&request.href, request.mode).await)
    }

    /// Load `href` and swap it in
    pub async fn navigate(&mut self, href: &str, mode: NavigationMode) -> NavigationOutcome {
        let pending = match self.begin_navigation(href, mode) {
            Ok(pending) => pending,
            Err(e) => return self.fail_navigation(href, e),
        };
        let fetched = pending.fetch(&self.fetcher).await;
        self.complete_navigation(fetched)
    }

    /// Start a navigation without fetching. Pair with
    /// [`PendingNavigation::fetch`] and [`Page::complete_navigation`] to
    /// overlap requests; only the newest one will be applied.
    pub fn begin_navigation(&mut self, href: &str, mode: NavigationMode) -> Result<PendingNavigation, LoadError> {
        // a replay runs after history has moved, so resolve against the entry being restored
        let base = match mode {
            NavigationMode::Fresh => self.doc.url(),
            NavigationMode::Replay => self.history.current().url.as_str(),
        };
        self.loader.begin(base, href, mode)
    }

    /// Apply a fetched page: swap, re-initialize, record history. Failures
    /// are logged and shown as a single error alert.
    pub fn complete_navigation(&mut self, fetched: FetchedPage) -> NavigationOutcome {
        let navigation = fetched.navigation.clone();

        match self.loader.swap(&mut self.doc, fetched) {
            Ok(SwapOutcome::Stale) => NavigationOutcome::Stale,
            Ok(SwapOutcome::Swapped { .. }) => {
                let dropped = self.listeners.retain(|node| self.doc.tree.is_connected(node));
                tracing::debug!("Dropped {} listeners of the old content", dropped);
                if let Err(e) = self.init_page() {
                    tracing::warn!("Re-initialization after swap failed: {}", e);
                }

                let state = Some(HistoryState::new(&navigation.href));
                let url = navigation.url.as_str();
                match navigation.mode {
                    NavigationMode::Fresh => self.history.push_state(state, "", url),
                    NavigationMode::Replay => self.history.replace_state(state, "", url),
                }
                self.loader.finish(navigation.ticket);
                NavigationOutcome::Swapped { url: url.to_string() }
            }
            Err(e) => {
                self.loader.finish(navigation.ticket);
                self.fail_navigation(&navigation.href, e)
            }
        }
    }

    fn fail_navigation(&mut self, href: &str, error: LoadError) -> NavigationOutcome {
        tracing::error!("Navigation to {} failed: {}", href, error);
        self.show_alert(LOAD_ERROR_MESSAGE, AlertKind::Error);
        NavigationOutcome::Failed(error)
    }

    /// Perform the navigation a link click requested, if any
    pub async fn run_pending_navigation(&mut self) -> Option<NavigationOutcome> {
        let request = self.queued.take()?;
        Some(self.navigate(&request.href, request.mode).await)
    }

    // ------------------------------------------------------------------
    // Alerts and time
    // ------------------------------------------------------------------

    /// Show a global alert, replacing any current one
    pub fn show_alert(&mut self, message: &str, kind: AlertKind) -> Option<NodeId> {
        match self.alerts.show(&mut self.doc, &mut self.timers, message, kind) {
            Ok(node) => node,
            Err(e) => {
                tracing::warn!("Cannot show alert: {}", e);
                None
            }
        }
    }

    /// Let `ms` milliseconds pass, running due timers in order
    pub fn advance(&mut self, ms: u64) {
        let until = self.timers.now().saturating_add(ms);
        while let Some((_, task)) = self.timers.pop_due(until) {
            if let Err(e) = self.alerts.run(&mut self.doc, task) {
                tracing::warn!("Alert timer failed: {}", e);
            }
        }
        self.timers.set_now(until);
    }

    // ------------------------------------------------------------------
    // Behaviors
    // ------------------------------------------------------------------

    fn run_behavior(&mut self, behavior: Behavior, node: NodeId, event: &mut DomEvent) {
        match behavior {
            Behavior::InterceptLinks => {
                if let Some(request) = navigation::handle_click(&self.doc, event, &self.config.external_prefixes) {
                    self.queued = Some(request);
                }
            }
            Behavior::ValidateForm => {
                event.prevent_default();
                self.validate_submission(node);
            }
            Behavior::ValidateField => {
                self.last_field_result = Some(fos_forms::validate_field(&mut self.doc, Some(node)));
            }
            Behavior::ClearFieldError => {
                if let Err(e) = fos_forms::clear_field_error(&mut self.doc, node) {
                    tracing::warn!("Cannot clear error on {}: {}", node, e);
                }
            }
            Behavior::RequestSubmit(form) => {
                event.prevent_default();
                self.pending_submits.push(form);
            }
            Behavior::ToggleTheme => {
                self.toggle_theme();
            }
        }
    }

    fn validate_submission(&mut self, form: NodeId) {
        let report = match fos_forms::validate_form(&mut self.doc, form) {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!("Form {} could not be validated: {}", form, e);
                return;
            }
        };

        if report.is_valid() {
            self.show_alert(SUBMIT_SUCCESS_MESSAGE, AlertKind::Success);
            if let Err(e) = self.doc.tree.reset_controls(form) {
                tracing::warn!("Form {} reset failed: {}", form, e);
            }
        } else {
            self.show_alert(SUBMIT_ERROR_MESSAGE, AlertKind::Error);
        }
        self.last_report = Some(report);
    }
}

impl<F: Fetcher> EventDispatcher for Page<F> {
    fn dispatch_event(&mut self, mut event: DomEvent) -> bool {
        for node in event.propagation_path(&self.doc.tree) {
            event.current_target = Some(node);
            for behavior in self.listeners.listeners(node, event.event_type) {
                self.run_behavior(behavior, node, &mut event);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }
        !event.is_default_prevented()
    }
}

/// Seven base-36 characters derived from `seed`
fn form_id(seed: u64) -> String {
    // splitmix64
    let mut x = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^= x >> 31;

    let mut id = String::from("form-");
    for _ in 0..7 {
        id.push(char::from_digit((x % 36) as u32, 36).unwrap_or('0'));
        x /= 36;
    }
    id
}
