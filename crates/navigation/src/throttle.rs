use std::{cell::Cell, rc::Rc, time::Duration};

use folio_shared::{Scheduler, TaskHandle};

/// Rate-limited wrapper returned by [`throttle`].
///
/// Despite the name this is a trailing-edge debounce: every call cancels the
/// pending one and schedules `func` again, so `func` only runs once calls
/// have been quiet for `wait`, with the arguments of the last call. Scroll
/// highlighting relies on exactly this timing.
pub struct Throttled<A> {
    scheduler: Rc<dyn Scheduler>,
    wait: Duration,
    func: Rc<dyn Fn(A)>,
    pending: Rc<Cell<Option<TaskHandle>>>,
}

pub fn throttle<A: 'static>(
    scheduler: Rc<dyn Scheduler>,
    wait: Duration,
    func: impl Fn(A) + 'static,
) -> Throttled<A> {
    Throttled {
        scheduler,
        wait,
        func: Rc::new(func),
        pending: Rc::new(Cell::new(None)),
    }
}

impl<A: 'static> Throttled<A> {
    pub fn call(&self, args: A) {
        self.cancel();

        let func = self.func.clone();
        let pending = self.pending.clone();
        let handle = self.scheduler.schedule(
            self.wait,
            Box::new(move || {
                pending.set(None);
                func(args);
            }),
        );

        self.pending.set(Some(handle));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Drops the pending call, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}
