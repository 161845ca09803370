//! Global alerts
//!
//! A single banner prepended to `body`. Showing a new alert removes the
//! previous one and cancels its pending timers.

use crate::config::AlertTimings;
use crate::timers::{TimerId, TimerQueue};
use fos_dom::{Document, DomResult, NodeId, Selector};

/// Class shared by every global alert
pub const ALERT_CLASS: &str = "spa-global-alert";
/// Class added while the alert is on screen
pub const VISIBLE_CLASS: &str = "visible";

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlertKind {
    #[default]
    Info,
    Success,
    Error,
}

impl AlertKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Info => "spa-alert-info",
            Self::Success => "spa-alert-success",
            Self::Error => "spa-alert-error",
        }
    }
}

/// Delayed alert work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertTask {
    Show(NodeId),
    Hide(NodeId),
    Remove(NodeId),
}

#[derive(Debug)]
struct ActiveAlert {
    node: NodeId,
    timers: [TimerId; 3],
}

/// Owns the current alert and its timers
#[derive(Debug, Default)]
pub struct AlertManager {
    timings: AlertTimings,
    current: Option<ActiveAlert>,
}

impl AlertManager {
    pub fn new(timings: AlertTimings) -> Self {
        Self { timings, current: None }
    }

    /// The alert element currently in the document
    pub fn current(&self) -> Option<NodeId> {
        self.current.as_ref().map(|a| a.node)
    }

    /// Replace any existing alert with a new one. Returns `None` when the
    /// document has no body to hold it.
    pub fn show(
        &mut self,
        doc: &mut Document,
        timers: &mut TimerQueue<AlertTask>,
        message: &str,
        kind: AlertKind,
    ) -> DomResult<Option<NodeId>> {
        self.dismiss(doc, timers)?;

        let body = doc.body();
        if !body.is_valid() {
            tracing::warn!("No body to show alert: {}", message);
            return Ok(None);
        }

        let class = format!("{} {}", ALERT_CLASS, kind.class());
        let div = doc.tree.create_element_with_attrs("div", &[("class", class.as_str())]);
        doc.tree.set_text_content(div, message)?;
        doc.tree.prepend_child(body, div)?;

        let ids = [
            timers.set_timeout(self.timings.show_after_ms, AlertTask::Show(div)),
            timers.set_timeout(self.timings.hide_after_ms, AlertTask::Hide(div)),
            timers.set_timeout(self.timings.remove_after_ms, AlertTask::Remove(div)),
        ];
        self.current = Some(ActiveAlert { node: div, timers: ids });

        tracing::debug!("Alert {:?}: {}", kind, message);
        Ok(Some(div))
    }

    /// Remove every alert in the document and cancel our timers
    pub fn dismiss(&mut self, doc: &mut Document, timers: &mut TimerQueue<AlertTask>) -> DomResult<()> {
        if let Some(active) = self.current.take() {
            for id in active.timers {
                timers.clear(id);
            }
        }
        for existing in doc.query_selector_all(doc.tree.root(), &Selector::class(ALERT_CLASS)) {
            doc.tree.detach(existing)?;
        }
        Ok(())
    }

    /// Apply a fired timer. Tasks for alerts that are gone are ignored.
    pub fn run(&mut self, doc: &mut Document, task: AlertTask) -> DomResult<()> {
        let (AlertTask::Show(node) | AlertTask::Hide(node) | AlertTask::Remove(node)) = task;
        if self.current() != Some(node) {
            return Ok(());
        }

        match task {
            AlertTask::Show(_) => doc.tree.expect_element_mut(node)?.add_class(&[VISIBLE_CLASS]),
            AlertTask::Hide(_) => doc.tree.expect_element_mut(node)?.remove_class(&[VISIBLE_CLASS]),
            AlertTask::Remove(_) => {
                doc.tree.detach(node)?;
                self.current = None;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until(manager: &mut AlertManager, doc: &mut Document, timers: &mut TimerQueue<AlertTask>, t: u64) {
        while let Some((_, task)) = timers.pop_due(t) {
            manager.run(doc, task).unwrap();
        }
        timers.set_now(t);
    }

    fn alerts(doc: &Document) -> Vec<NodeId> {
        doc.query_selector_all(doc.tree.root(), &Selector::class(ALERT_CLASS))
    }

    #[test]
    fn test_alert_timeline() {
        let mut doc = Document::new("https://example.com/");
        let mut timers = TimerQueue::new();
        let mut manager = AlertManager::default();

        let div = manager.show(&mut doc, &mut timers, "Olá", AlertKind::Info).unwrap().unwrap();
        assert_eq!(doc.tree.element_children(doc.body()).next(), Some(div));
        assert_eq!(doc.tree.element(div).unwrap().get_attr("class"), Some("spa-global-alert spa-alert-info"));

        run_until(&mut manager, &mut doc, &mut timers, 50);
        assert!(doc.tree.element(div).unwrap().has_class(VISIBLE_CLASS));

        run_until(&mut manager, &mut doc, &mut timers, 5000);
        assert!(!doc.tree.element(div).unwrap().has_class(VISIBLE_CLASS));
        assert_eq!(alerts(&doc), vec![div]);

        run_until(&mut manager, &mut doc, &mut timers, 5500);
        assert!(alerts(&doc).is_empty());
        assert_eq!(manager.current(), None);
    }

    #[test]
    fn test_new_alert_replaces_old() {
        let mut doc = Document::new("https://example.com/");
        let mut timers = TimerQueue::new();
        let mut manager = AlertManager::default();

        manager.show(&mut doc, &mut timers, "a", AlertKind::Error).unwrap();
        run_until(&mut manager, &mut doc, &mut timers, 3000);
        let second = manager.show(&mut doc, &mut timers, "b", AlertKind::Success).unwrap().unwrap();
        assert_eq!(alerts(&doc), vec![second]);
        assert_eq!(timers.pending(), 3);

        // the first alert's removal time passes without touching the second
        run_until(&mut manager, &mut doc, &mut timers, 5600);
        assert_eq!(alerts(&doc), vec![second]);
        run_until(&mut manager, &mut doc, &mut timers, 8500);
        assert!(alerts(&doc).is_empty());
    }

    #[test]
    fn test_foreign_alert_removed() {
        let mut doc = Document::new("https://example.com/");
        let body = doc.body();
        let stray = doc.tree.create_element_with_attrs("div", &[("class", ALERT_CLASS)]);
        doc.tree.append_child(body, stray).unwrap();

        let mut timers = TimerQueue::new();
        let mut manager = AlertManager::default();
        let div = manager.show(&mut doc, &mut timers, "x", AlertKind::Info).unwrap().unwrap();
        assert_eq!(alerts(&doc), vec![div]);
    }

    #[test]
    fn test_no_body() {
        let mut doc = Document::empty("about:blank");
        let mut timers = TimerQueue::new();
        let mut manager = AlertManager::default();
        assert_eq!(manager.show(&mut doc, &mut timers, "x", AlertKind::Info).unwrap(), None);
        assert_eq!(timers.pending(), 0);
    }
}
