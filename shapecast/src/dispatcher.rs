use std::{
    fmt,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::{
    AnyEvent, Config, Delivery, DispatchId, Error, Event, FailurePolicy, Handler, Shape, SubscriptionId,
    internal::{Binding, Registry, Subscribed, lock},
    monitoring::{HandlerFailure, MonitorRegistry, Removal},
};

struct Shared {
    registry: Mutex<Registry>,
    monitors: MonitorRegistry,
    config: Config,
    next_dispatch: AtomicU64,
}

/// Shape-keyed publish/subscribe registry.
///
/// Handlers subscribe to one event type; [`dispatch`](Self::dispatch)
/// synchronously calls every handler currently subscribed to the event's
/// [`Shape`], in subscription order, before returning.
///
/// `Dispatcher` is cheap to clone: clones share the same registry, so one
/// instance can be created at startup and handed to every component that
/// publishes or subscribes. Independent instances never see each other's
/// handlers.
///
/// # Guarantees
///
/// - **Order**: handlers run in the order they were subscribed.
/// - **Idempotence**: subscribing the same [`Handler`] (or a clone of it)
///   again is a no-op and returns the existing [`SubscriptionId`].
/// - **Snapshot**: a dispatch works on a copy of the handler list taken when
///   it starts. Handlers subscribed or unsubscribed while it runs (even by
///   the handlers themselves) only affect later dispatches.
/// - **Isolation**: a handler that returns `Err`, panics or cannot accept the
///   event does not stop the others. Under the default
///   [`FailurePolicy::Unsubscribe`] it is removed from its shape. The failure
///   is reported to [monitors](crate::monitoring), never to the caller.
/// - **No hierarchy**: a handler only receives events of exactly its shape.
///
/// No internal lock is held while handlers or monitors run, so both may call
/// back into the dispatcher.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, atomic::{AtomicI32, Ordering}};
/// use shapecast::{Dispatcher, Handler, IntValue, ValueEvent, value_event};
///
/// value_event!(pub struct HealthChanged(IntValue: i32) = "health_changed");
///
/// let dispatcher = Dispatcher::new();
/// let health = Arc::new(AtomicI32::new(100));
///
/// let hud = {
///     let health = health.clone();
///     Handler::named("hud", move |e: &HealthChanged| health.store(e.value(), Ordering::SeqCst))
/// };
/// dispatcher.subscribe(&hud);
///
/// dispatcher.dispatch(&HealthChanged::from(75));
/// assert_eq!(health.load(Ordering::SeqCst), 75);
///
/// dispatcher.unsubscribe(&hud);
/// dispatcher.dispatch(&HealthChanged::from(10));
/// assert_eq!(health.load(Ordering::SeqCst), 75);
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    shared: Arc<Shared>,
}

impl Dispatcher {
    /// Create an empty dispatcher with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty dispatcher.
    pub fn with_config(config: Config) -> Self {
        Self {
            shared: Arc::new(Shared {
                registry: Mutex::new(Registry::new(config.shape_capacity())),
                monitors: MonitorRegistry::new(),
                config,
                next_dispatch: AtomicU64::new(0),
            }),
        }
    }

    /// Returns the configuration this dispatcher was built with.
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    /// Returns the registry of monitors observing this dispatcher.
    pub fn monitors(&self) -> &MonitorRegistry {
        &self.shared.monitors
    }

    /// Subscribe `handler` to events of shape `E::SHAPE`.
    ///
    /// Returns the registration token. If this handler (or a clone of it) is
    /// already subscribed, nothing changes and the existing token is returned.
    pub fn subscribe<E: Event>(&self, handler: &Handler<E>) -> SubscriptionId {
        let subscribed = lock(&self.shared.registry).subscribe(handler);
        let id = subscribed.id();

        if let Subscribed::Added(_) = subscribed {
            let shape = E::SHAPE;
            tracing::trace!(shape = %shape, subscription = %id, handler = %handler.name(), "handler subscribed");
            self.shared
                .monitors
                .notify(|m| m.on_subscribed(&shape, id, handler.name()));
        }
        id
    }

    /// Unsubscribe `handler` from shape `E::SHAPE`.
    ///
    /// Returns `false` if the handler was not subscribed; that is not an error.
    /// The handler may be subscribed again afterwards.
    pub fn unsubscribe<E: Event>(&self, handler: &Handler<E>) -> bool {
        let removed = lock(&self.shared.registry).unsubscribe(&E::SHAPE, handler.id());
        self.finish_removal(removed, Removal::Unsubscribed)
    }

    /// Unsubscribe the registration identified by `subscription`.
    ///
    /// Returns `false` if it no longer exists.
    pub fn cancel(&self, subscription: SubscriptionId) -> bool {
        let removed = lock(&self.shared.registry).cancel(subscription);
        self.finish_removal(removed, Removal::Cancelled)
    }

    /// Deliver `event` to every handler subscribed to its shape.
    ///
    /// Runs all handlers before returning. Never fails: a shape without
    /// subscribers is a no-op, and handler failures are handled according
    /// to the [`FailurePolicy`] and reported to monitors.
    pub fn dispatch<E: Event>(&self, event: &E) -> Delivery {
        self.dispatch_dyn(event)
    }

    /// Like [`dispatch`](Self::dispatch), for a type-erased event.
    pub fn dispatch_dyn(&self, event: &dyn AnyEvent) -> Delivery {
        let shape = event.shape();
        let id = DispatchId::new(self.shared.next_dispatch.fetch_add(1, Ordering::Relaxed));
        let mut delivery = Delivery::new(id, shape.clone());

        let snapshot = lock(&self.shared.registry).snapshot(&shape);

        if let Some(bindings) = snapshot {
            for binding in bindings {
                delivery.record_invoked();
                if let Err(error) = binding.invoke(event) {
                    delivery.record_failed(binding.id());
                    self.handle_failure(&delivery, &binding, error);
                }
            }
        }

        tracing::trace!(
            shape = %shape,
            dispatch_id = %delivery.id(),
            invoked = delivery.invoked(),
            failed = delivery.failed().len(),
            "event dispatched"
        );
        self.shared.monitors.notify(|m| m.on_dispatched(&delivery));

        delivery
    }

    fn handle_failure(&self, delivery: &Delivery, binding: &Binding, error: Error) {
        let removed = match self.shared.config.failure_policy() {
            FailurePolicy::Unsubscribe => {
                lock(&self.shared.registry).remove(binding.shape(), binding.id())
            }
            FailurePolicy::Retain => None,
        };

        tracing::debug!(
            shape = %binding.shape(),
            subscription = %binding.id(),
            handler = %binding.name(),
            dispatch_id = %delivery.id(),
            error = %error,
            removed = removed.is_some(),
            "handler failed"
        );

        let failure = HandlerFailure {
            dispatch: delivery.id(),
            shape: binding.shape().clone(),
            subscription: binding.id(),
            handler: binding.name().clone(),
            error,
            removed: removed.is_some(),
        };
        self.shared.monitors.notify(|m| m.on_handler_failed(&failure));

        if removed.is_some() {
            self.shared
                .monitors
                .notify(|m| m.on_unsubscribed(binding.shape(), binding.id(), Removal::Failed));
        }
    }

    fn finish_removal(&self, removed: Option<Arc<Binding>>, reason: Removal) -> bool {
        let Some(binding) = removed else {
            return false;
        };

        tracing::trace!(
            shape = %binding.shape(),
            subscription = %binding.id(),
            handler = %binding.name(),
            reason = %reason,
            "handler unsubscribed"
        );
        self.shared
            .monitors
            .notify(|m| m.on_unsubscribed(binding.shape(), binding.id(), reason));
        true
    }

    /// `true` if `handler` is currently subscribed.
    pub fn is_subscribed<E: Event>(&self, handler: &Handler<E>) -> bool {
        lock(&self.shared.registry).contains(handler.id())
    }

    /// Number of handlers subscribed to shape `E::SHAPE`.
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.subscriber_count_for(&E::SHAPE)
    }

    /// Number of handlers subscribed to `shape`.
    pub fn subscriber_count_for(&self, shape: &Shape) -> usize {
        lock(&self.shared.registry).count(shape)
    }

    /// Shapes that have been subscribed to, sorted by tag.
    ///
    /// A shape stays listed after its last handler is unsubscribed, until
    /// [`clear`](Self::clear).
    pub fn shapes(&self) -> Vec<Shape> {
        lock(&self.shared.registry).shapes()
    }

    /// Total number of registrations across all shapes.
    pub fn len(&self) -> usize {
        lock(&self.shared.registry).len()
    }

    /// `true` if no handler is subscribed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every registration and shape entry.
    ///
    /// Monitors stay attached and receive
    /// [`on_unsubscribed`](crate::monitoring::Monitor::on_unsubscribed) with
    /// [`Removal::Cleared`] for each removed registration.
    pub fn clear(&self) {
        let removed = lock(&self.shared.registry).clear();
        tracing::trace!(removed = removed.len(), "dispatcher cleared");
        for binding in removed {
            self.shared
                .monitors
                .notify(|m| m.on_unsubscribed(binding.shape(), binding.id(), Removal::Cleared));
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = lock(&self.shared.registry);
        f.debug_struct("Dispatcher")
            .field("shapes", &registry.shapes())
            .field("subscriptions", &registry.len())
            .field("monitors", &self.shared.monitors)
            .field("config", &self.shared.config)
            .finish()
    }
}
