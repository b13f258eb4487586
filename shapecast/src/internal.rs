mod binding;
mod registry;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub(crate) use binding::Binding;
pub(crate) use registry::{Registry, Subscribed};

/// Lock a mutex, recovering the data if a previous holder panicked.
///
/// Handlers and monitors never run under our locks, so a poisoned lock can
/// only come from a panic inside the registry itself, which leaves no
/// partially applied update behind.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
