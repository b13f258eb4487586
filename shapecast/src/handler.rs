use std::{fmt, sync::Arc};

use crate::{Error, Event, Result, error::BoxError};

/// Return types accepted from handler closures.
///
/// Handlers either return nothing or a `Result` whose error converts into
/// [`BoxError`]. An `Err` counts as a handler failure, exactly like a panic.
pub trait IntoHandlerResult {
    fn into_handler_result(self) -> Result;
}

impl IntoHandlerResult for () {
    fn into_handler_result(self) -> Result {
        Ok(())
    }
}

impl<Err: Into<BoxError>> IntoHandlerResult for std::result::Result<(), Err> {
    fn into_handler_result(self) -> Result {
        self.map_err(Error::handler)
    }
}

/// Identity of a [`Handler`].
///
/// Two handles have the same identity if one was cloned from the other.
/// The dispatcher uses identity to make subscription idempotent and to
/// find the registration to remove on unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(usize);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

type HandlerFn<E> = dyn Fn(&E) -> Result + Send + Sync;

/// Callback for events of one shape.
///
/// A `Handler` is a cheap, cloneable handle. Keep a clone around to
/// unsubscribe later; subscribing the same handle (or any clone of it)
/// twice has no additional effect.
///
/// # Example
///
/// ```rust
/// use shapecast::{Dispatcher, Handler, IntValue};
///
/// let dispatcher = Dispatcher::new();
/// let print = Handler::new(|e: &IntValue| println!("value = {}", e.value));
///
/// dispatcher.subscribe(&print);
/// dispatcher.dispatch(&IntValue::new(3));
/// dispatcher.unsubscribe(&print);
/// ```
pub struct Handler<E: Event> {
    name: Arc<str>,
    f: Arc<HandlerFn<E>>,
}

impl<E: Event> Handler<E> {
    /// Wrap a closure. The diagnostic name defaults to the closure's type name.
    ///
    /// A closure whose body only diverges (`panic!`, `todo!`) has no
    /// inferable return type; annotate it with `-> ()`.
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn(&E) -> R + Send + Sync + 'static,
        R: IntoHandlerResult,
    {
        Self::named(std::any::type_name::<F>(), f)
    }

    /// Wrap a closure with a name shown in logs and failure reports.
    ///
    /// Prefer short, descriptive names (e.g. "audit", "hud").
    pub fn named<F, R>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(&E) -> R + Send + Sync + 'static,
        R: IntoHandlerResult,
    {
        Self {
            name: name.into(),
            f: Arc::new(move |e: &E| f(e).into_handler_result()),
        }
    }

    /// Returns the identity of this handle.
    #[inline]
    pub fn id(&self) -> HandlerId {
        HandlerId(Arc::as_ptr(&self.f) as *const () as usize)
    }

    /// Returns the diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_arc(&self) -> Arc<str> {
        self.name.clone()
    }

    /// Invoke the handler directly, bypassing any dispatcher.
    pub fn call(&self, event: &E) -> Result {
        (self.f)(event)
    }
}

impl<E: Event> Clone for Handler<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            f: self.f.clone(),
        }
    }
}

impl<E: Event> PartialEq for Handler<E> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl<E: Event> Eq for Handler<E> {}

impl<E: Event> fmt::Debug for Handler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name)
            .field("shape", &E::SHAPE)
            .field("id", &self.id())
            .finish()
    }
}
