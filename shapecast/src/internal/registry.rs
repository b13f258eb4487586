use std::{collections::HashMap, sync::Arc};

use super::Binding;
use crate::{Event, Handler, HandlerId, Shape, SubscriptionId};

/// Outcome of [`Registry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Subscribed {
    Added(SubscriptionId),
    Existing(SubscriptionId),
}

impl Subscribed {
    pub fn id(self) -> SubscriptionId {
        match self {
            Subscribed::Added(id) | Subscribed::Existing(id) => id,
        }
    }
}

/// Shape-keyed handler lists plus the identity index used for idempotent
/// subscription and unsubscription by handler.
///
/// Invariant: a binding is in `handlers` if and only if it is in the list of
/// its shape in `listeners`.
pub(crate) struct Registry {
    listeners: HashMap<Shape, Vec<Arc<Binding>>>,
    handlers: HashMap<HandlerId, Arc<Binding>>,
    next_id: u64,
    shape_capacity: usize,
}

impl Registry {
    pub fn new(shape_capacity: usize) -> Self {
        Self {
            listeners: HashMap::new(),
            handlers: HashMap::new(),
            next_id: 0,
            shape_capacity,
        }
    }

    pub fn subscribe<E: Event>(&mut self, handler: &Handler<E>) -> Subscribed {
        let capacity = self.shape_capacity;
        let list = self
            .listeners
            .entry(E::SHAPE)
            .or_insert_with(|| Vec::with_capacity(capacity));

        if let Some(existing) = self.handlers.get(&handler.id()) {
            return Subscribed::Existing(existing.id());
        }

        let id = SubscriptionId::new(self.next_id);
        self.next_id += 1;

        let binding = Arc::new(Binding::new(id, handler));
        list.push(binding.clone());
        self.handlers.insert(handler.id(), binding);
        Subscribed::Added(id)
    }

    /// Remove the binding of `handler_id` from `shape`.
    pub fn unsubscribe(&mut self, shape: &Shape, handler_id: HandlerId) -> Option<Arc<Binding>> {
        let list = self.listeners.get_mut(shape)?;
        let binding = self.handlers.get(&handler_id)?;
        let pos = list.iter().position(|b| Arc::ptr_eq(b, binding))?;
        let removed = list.remove(pos);
        self.handlers.remove(&handler_id);
        Some(removed)
    }

    /// Remove the registration `id` from `shape`.
    pub fn remove(&mut self, shape: &Shape, id: SubscriptionId) -> Option<Arc<Binding>> {
        let list = self.listeners.get_mut(shape)?;
        let pos = list.iter().position(|b| b.id() == id)?;
        let removed = list.remove(pos);
        self.handlers.remove(&removed.handler_id());
        Some(removed)
    }

    /// Remove the registration `id`, whatever its shape.
    pub fn cancel(&mut self, id: SubscriptionId) -> Option<Arc<Binding>> {
        let shape = self
            .handlers
            .values()
            .find(|b| b.id() == id)
            .map(|b| b.shape().clone())?;
        self.remove(&shape, id)
    }

    /// Stable copy of the handler list for `shape`, in registration order.
    pub fn snapshot(&self, shape: &Shape) -> Option<Vec<Arc<Binding>>> {
        self.listeners.get(shape).map(|list| list.to_vec())
    }

    pub fn contains(&self, handler_id: HandlerId) -> bool {
        self.handlers.contains_key(&handler_id)
    }

    pub fn count(&self, shape: &Shape) -> usize {
        self.listeners.get(shape).map_or(0, Vec::len)
    }

    /// Shapes that have (or had) at least one subscription.
    pub fn shapes(&self) -> Vec<Shape> {
        let mut shapes: Vec<Shape> = self.listeners.keys().cloned().collect();
        shapes.sort();
        shapes
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Drop every registration and shape entry, returning the removed bindings
    /// in registration order.
    pub fn clear(&mut self) -> Vec<Arc<Binding>> {
        self.handlers.clear();
        let mut removed: Vec<Arc<Binding>> = self.listeners.drain().flat_map(|(_, l)| l).collect();
        removed.sort_by_key(|b| b.id());
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tick;
    impl Event for Tick {
        const SHAPE: Shape = Shape::new("tick");
    }

    struct Tock;
    impl Event for Tock {
        const SHAPE: Shape = Shape::new("tock");
    }

    fn registry() -> Registry {
        Registry::new(4)
    }

    #[test]
    fn subscribe_is_idempotent_per_identity() {
        let mut reg = registry();
        let h = Handler::new(|_: &Tick| {});

        let first = reg.subscribe(&h);
        let second = reg.subscribe(&h.clone());
        assert!(matches!(first, Subscribed::Added(_)));
        assert_eq!(second, Subscribed::Existing(first.id()));
        assert_eq!(reg.count(&Tick::SHAPE), 1);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn ids_follow_registration_order() {
        let mut reg = registry();
        let a = reg.subscribe(&Handler::new(|_: &Tick| {})).id();
        let b = reg.subscribe(&Handler::new(|_: &Tock| {})).id();
        let c = reg.subscribe(&Handler::new(|_: &Tick| {})).id();
        assert!(a < b && b < c);

        let order: Vec<_> = reg
            .snapshot(&Tick::SHAPE)
            .unwrap()
            .iter()
            .map(|b| b.id())
            .collect();
        assert_eq!(order, vec![a, c]);
    }

    #[test]
    fn unsubscribe_clears_identity() {
        let mut reg = registry();
        let h = Handler::new(|_: &Tick| {});
        let first = reg.subscribe(&h).id();

        assert!(reg.unsubscribe(&Tick::SHAPE, h.id()).is_some());
        assert!(!reg.contains(h.id()));
        assert_eq!(reg.count(&Tick::SHAPE), 0);

        let again = reg.subscribe(&h);
        assert!(matches!(again, Subscribed::Added(id) if id != first));
    }

    #[test]
    fn unsubscribe_unknown_is_none() {
        let mut reg = registry();
        let h = Handler::new(|_: &Tick| {});
        assert!(reg.unsubscribe(&Tick::SHAPE, h.id()).is_none());

        reg.subscribe(&Handler::new(|_: &Tick| {}));
        assert!(reg.unsubscribe(&Tick::SHAPE, h.id()).is_none());
        assert_eq!(reg.count(&Tick::SHAPE), 1);
    }

    #[test]
    fn shape_entry_is_created_even_for_redundant_subscribe() {
        let mut reg = registry();
        let h = Handler::new(|_: &Tick| {});
        reg.subscribe(&h);
        reg.unsubscribe(&Tick::SHAPE, h.id());

        assert_eq!(reg.shapes(), vec![Tick::SHAPE]);
        assert_eq!(reg.snapshot(&Tick::SHAPE).map(|l| l.len()), Some(0));
        assert!(reg.snapshot(&Tock::SHAPE).is_none());
    }

    #[test]
    fn cancel_finds_shape_by_id() {
        let mut reg = registry();
        let h = Handler::new(|_: &Tock| {});
        let id = reg.subscribe(&h).id();

        let removed = reg.cancel(id).expect("registered");
        assert_eq!(removed.handler_id(), h.id());
        assert!(reg.cancel(id).is_none());
        assert!(!reg.contains(h.id()));
    }

    #[test]
    fn clear_returns_bindings_in_registration_order() {
        let mut reg = registry();
        let a = reg.subscribe(&Handler::new(|_: &Tick| {})).id();
        let b = reg.subscribe(&Handler::new(|_: &Tock| {})).id();

        let removed: Vec<_> = reg.clear().iter().map(|b| b.id()).collect();
        assert_eq!(removed, vec![a, b]);
        assert_eq!(reg.len(), 0);
        assert!(reg.shapes().is_empty());
    }
}
