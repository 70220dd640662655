use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    time::Duration,
};

/// A deferred unit of work. Everything runs on the page's single thread.
pub type Task = Box<dyn FnOnce()>;

/// Identifies a task handed to a [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// One-shot timers, `setTimeout`/`clearTimeout` style.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle;

    /// Cancelling a task that already ran (or was never scheduled) is a no-op.
    fn cancel(&self, handle: TaskHandle);
}

/// Deterministic scheduler driven by an explicit clock.
///
/// Nothing runs until [`VirtualScheduler::advance`] moves time forward. Due
/// tasks run in due-time order, ties broken by scheduling order, and the
/// clock reads the task's due time while it runs.
#[derive(Default)]
pub struct VirtualScheduler {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    queue: RefCell<BTreeMap<(Duration, u64), Task>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Due time of the next pending task.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.borrow().keys().next().map(|(due, _)| *due)
    }

    /// Moves the clock forward by `by`, running every task that falls due,
    /// including tasks scheduled by tasks run along the way.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;

        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                match queue.keys().next().copied() {
                    Some(key) if key.0 <= target => queue.remove(&key).map(|task| (key.0, task)),
                    _ => None,
                }
            };

            let Some((due, task)) = next else {
                break;
            };

            self.now.set(due);
            task();
        }

        self.now.set(target);
    }

    /// Advances to an absolute point in time. Earlier points are ignored.
    pub fn advance_to(&self, at: Duration) {
        if let Some(by) = at.checked_sub(self.now.get()) {
            self.advance(by);
        }
    }

    /// Runs until the queue is empty.
    pub fn run_until_idle(&self) {
        while let Some(due) = self.next_due() {
            self.advance_to(due);
        }
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        self.queue
            .borrow_mut()
            .insert((self.now.get() + delay, id), task);

        TaskHandle(id)
    }

    fn cancel(&self, handle: TaskHandle) {
        self.queue.borrow_mut().retain(|(_, id), _| *id != handle.0);
    }
}
