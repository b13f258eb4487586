use std::{
    fmt,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::{
    internal::lock,
    monitoring::{Monitor, MonitorId},
};

struct MonitorEntry {
    id: MonitorId,
    monitor: Arc<dyn Monitor>,
    paused: bool,
}

#[derive(Default)]
struct MonitorSet {
    entries: Vec<MonitorEntry>,
    last_id: MonitorId,
}

/// Registry of monitors attached to a dispatcher.
///
/// Access via [`Dispatcher::monitors()`](crate::Dispatcher::monitors).
///
/// # Example
///
/// ```rust
/// use shapecast::{Dispatcher, monitors::Tracer};
///
/// let dispatcher = Dispatcher::new();
/// let registry = dispatcher.monitors();
///
/// let id = registry.add(Tracer);
/// registry.pause(id);
/// registry.resume(id);
/// registry.remove(id);
/// ```
pub struct MonitorRegistry {
    inner: Mutex<MonitorSet>,
    is_active: AtomicBool,
}

impl MonitorRegistry {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(MonitorSet::default()),
            is_active: AtomicBool::new(false),
        }
    }

    /// Register a monitor and return its id.
    ///
    /// The monitor starts in the active (non-paused) state.
    pub fn add<M: Monitor + 'static>(&self, monitor: M) -> MonitorId {
        self.add_arc(Arc::new(monitor))
    }

    /// Register a shared monitor, keeping a handle for querying it later.
    pub fn add_arc(&self, monitor: Arc<dyn Monitor>) -> MonitorId {
        let mut set = lock(&self.inner);
        let id = set.last_id;
        set.last_id += 1;
        set.entries.push(MonitorEntry {
            id,
            monitor,
            paused: false,
        });
        self.update_is_active(&set);
        id
    }

    /// Remove a monitor. Returns `false` if no monitor had this id.
    pub fn remove(&self, id: MonitorId) -> bool {
        let mut set = lock(&self.inner);
        let before = set.entries.len();
        set.entries.retain(|e| e.id != id);
        let removed = set.entries.len() != before;
        self.update_is_active(&set);
        removed
    }

    /// Pause one monitor. Paused monitors receive no callbacks.
    pub fn pause(&self, id: MonitorId) {
        self.set_paused(|e| e.id == id, true);
    }

    /// Resume one monitor.
    pub fn resume(&self, id: MonitorId) {
        self.set_paused(|e| e.id == id, false);
    }

    /// Pause all registered monitors.
    pub fn pause_all(&self) {
        self.set_paused(|_| true, true);
    }

    /// Resume all registered monitors.
    pub fn resume_all(&self) {
        self.set_paused(|_| true, false);
    }

    /// Number of registered monitors, paused or not.
    pub fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }

    /// `true` if no monitors are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if at least one monitor is registered and not paused.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_active.load(Ordering::Relaxed)
    }

    fn set_paused(&self, matches: impl Fn(&MonitorEntry) -> bool, paused: bool) {
        let mut set = lock(&self.inner);
        for entry in set.entries.iter_mut().filter(|e| matches(e)) {
            entry.paused = paused;
        }
        self.update_is_active(&set);
    }

    fn update_is_active(&self, set: &MonitorSet) {
        let active = set.entries.iter().any(|e| !e.paused);
        self.is_active.store(active, Ordering::Relaxed);
    }

    /// Invoke `f` on every active monitor, outside the lock.
    ///
    /// Monitors that panic are removed.
    pub(crate) fn notify(&self, f: impl Fn(&dyn Monitor)) {
        if !self.is_active() {
            return;
        }

        let snapshot: Vec<(MonitorId, Arc<dyn Monitor>)> = lock(&self.inner)
            .entries
            .iter()
            .filter(|e| !e.paused)
            .map(|e| (e.id, e.monitor.clone()))
            .collect();

        let mut ids_to_remove = Vec::new();
        for (id, monitor) in snapshot {
            let result = catch_unwind(AssertUnwindSafe(|| f(monitor.as_ref())));
            if result.is_err() {
                tracing::error!(monitor_id = %id, "monitor panicked, removing");
                ids_to_remove.push(id);
            }
        }

        for id in ids_to_remove {
            self.remove(id);
        }
    }
}

impl fmt::Debug for MonitorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set = lock(&self.inner);
        f.debug_struct("MonitorRegistry")
            .field("monitors.len()", &set.entries.len())
            .field("last_id", &set.last_id)
            .field("is_active", &self.is_active)
            .finish()
    }
}
