//! Timers
//!
//! `setTimeout` on a virtual clock. The host advances time explicitly, so
//! delayed work runs deterministically.

/// Handle returned by [`TimerQueue::set_timeout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u32);

#[derive(Debug)]
struct Timer<T> {
    id: TimerId,
    due_at: u64,
    task: T,
}

/// One-shot timers carrying a task of type `T`
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: u64,
    next_id: u32,
    timers: Vec<Timer<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self { now: 0, next_id: 1, timers: Vec::new() }
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule `task` to run `delay_ms` from now
    pub fn set_timeout(&mut self, delay_ms: u64, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer { id, due_at: self.now.saturating_add(delay_ms), task });
        id
    }

    /// Cancel a timer. Returns `false` if it already fired or was cleared.
    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Check if a timer is still pending
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Number of pending timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its deadline. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: u64) -> Option<(TimerId, T)> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_at <= until)
            .min_by_key(|(_, t)| (t.due_at, t.id))
            .map(|(i, _)| i)?;
        let timer = self.timers.remove(index);
        self.now = self.now.max(timer.due_at);
        Some((timer.id, timer.task))
    }

    /// Move the clock forward without running anything
    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    /// Time until the next timer fires
    pub fn time_until_next(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due_at.saturating_sub(self.now)).min()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TimerQueue<&'static str>, until: u64) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some((_, task)) = queue.pop_due(until) {
            fired.push(task);
        }
        queue.set_now(until);
        fired
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.set_timeout(5000, "hide");
        queue.set_timeout(50, "show");
        queue.set_timeout(5500, "remove");

        assert_eq!(drain(&mut queue, 49), Vec::<&str>::new());
        assert_eq!(drain(&mut queue, 50), vec!["show"]);
        assert_eq!(drain(&mut queue, 6000), vec!["hide", "remove"]);
        assert_eq!(queue.now(), 6000);
    }

    #[test]
    fn test_clear() {
        let mut queue = TimerQueue::new();
        let id = queue.set_timeout(10, "a");
        assert!(queue.is_pending(id));
        assert!(queue.clear(id));
        assert!(!queue.clear(id));
        assert_eq!(drain(&mut queue, 100), Vec::<&str>::new());
    }

    #[test]
    fn test_delay_relative_to_now() {
        let mut queue = TimerQueue::new();
        queue.set_now(1000);
        queue.set_timeout(50, "late");
        assert_eq!(queue.time_until_next(), Some(50));
        assert_eq!(drain(&mut queue, 1049), Vec::<&str>::new());
        assert_eq!(drain(&mut queue, 1050), vec!["late"]);
    }

    #[test]
    fn test_same_deadline_keeps_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.set_timeout(10, "first");
        queue.set_timeout(10, "second");
        assert_eq!(drain(&mut queue, 10), vec!["first", "second"]);
    }
}
