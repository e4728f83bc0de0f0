//! Delayed messages on a logical clock
//!
//! The engine never arms wall-clock timers. It schedules events here and the
//! owner advances the clock, either with real elapsed time (the terminal
//! front end sleeps on tokio) or instantly (simulations and tests). Because
//! every pending event lives inside the scheduler, dropping or cancelling it
//! guarantees nothing fires after a session is left.

use std::time::Duration;

/// Handle to one scheduled event, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct ScheduledTask<E> {
    id: TaskId,
    due: Duration,
    event: E,
}

#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    now: Duration,
    next_id: u64,
    tasks: Vec<ScheduledTask<E>>,
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Scheduler {
            now: Duration::ZERO,
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    /// Current logical time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `event` to fire `delay` after now
    pub fn schedule(&mut self, delay: Duration, event: E) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            due: self.now + delay,
            event,
        });
        id
    }

    /// Cancel one task; returns false if it already fired or was cancelled
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Time remaining until the earliest pending event
    pub fn next_due_in(&self) -> Option<Duration> {
        self.tasks
            .iter()
            .map(|t| t.due.saturating_sub(self.now))
            .min()
    }

    /// Pop the earliest event due at or before `deadline`
    ///
    /// The clock moves to the popped event's due time, so handlers that
    /// schedule follow-ups measure from the right instant. Ties fire in
    /// scheduling order.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<E> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(_, t)| (t.due, t.id.0))
            .map(|(i, _)| i)?;
        let task = self.tasks.remove(index);
        if task.due > self.now {
            self.now = task.due;
        }
        Some(task.event)
    }

    /// Move the clock forward without firing anything
    ///
    /// Call after draining [`Scheduler::pop_due`] for the same deadline.
    pub fn advance_to(&mut self, deadline: Duration) {
        if deadline > self.now {
            self.now = deadline;
        }
    }
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_events_fire_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(1500), "advance");
        s.schedule(ms(1200), "speaking");
        assert_eq!(s.next_due_in(), Some(ms(1200)));

        assert_eq!(s.pop_due(ms(1000)), None);
        assert_eq!(s.pop_due(ms(2000)), Some("speaking"));
        assert_eq!(s.now(), ms(1200));
        assert_eq!(s.pop_due(ms(2000)), Some("advance"));
        assert_eq!(s.pop_due(ms(2000)), None);
        s.advance_to(ms(2000));
        assert_eq!(s.now(), ms(2000));
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(10), 1);
        s.schedule(ms(10), 2);
        assert_eq!(s.pop_due(ms(10)), Some(1));
        assert_eq!(s.pop_due(ms(10)), Some(2));
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        let a = s.schedule(ms(600), 'a');
        s.schedule(ms(700), 'b');
        assert!(s.cancel(a));
        assert!(!s.cancel(a));
        assert_eq!(s.pending(), 1);
        s.cancel_all();
        assert!(s.is_idle());
        assert_eq!(s.pop_due(ms(10_000)), None);
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut s = Scheduler::new();
        s.advance_to(ms(500));
        s.schedule(ms(100), ());
        assert_eq!(s.next_due_in(), Some(ms(100)));
        assert_eq!(s.pop_due(ms(599)), None);
        assert_eq!(s.pop_due(ms(600)), Some(()));
    }
}
