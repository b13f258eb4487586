use std::{
    any::type_name,
    fmt,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
};

use crate::{AnyEvent, Error, Event, Handler, HandlerId, Result, Shape, SubscriptionId};

type Callback = Box<dyn Fn(&dyn AnyEvent) -> Result + Send + Sync>;

/// A handler bound to the registry: narrows a type-erased event to the
/// handler's event type before calling it.
pub(crate) struct Binding {
    id: SubscriptionId,
    shape: Shape,
    handler_id: HandlerId,
    name: Arc<str>,
    callback: Callback,
}

impl Binding {
    pub fn new<E: Event>(id: SubscriptionId, handler: &Handler<E>) -> Self {
        let handler_id = handler.id();
        let name = handler.name_arc();
        let handler = handler.clone();

        let callback = move |event: &dyn AnyEvent| match event.as_any().downcast_ref::<E>() {
            Some(event) => handler.call(event),
            None => Err(Error::ShapeMismatch {
                shape: E::SHAPE,
                expected: type_name::<E>(),
                actual: event.type_name(),
            }),
        };

        Self {
            id,
            shape: E::SHAPE,
            handler_id,
            name,
            callback: Box::new(callback),
        }
    }

    /// Invoke the handler. Panics are caught and returned as [`Error::Panicked`].
    pub fn invoke(&self, event: &dyn AnyEvent) -> Result {
        match catch_unwind(AssertUnwindSafe(|| (self.callback)(event))) {
            Ok(result) => result,
            Err(payload) => Err(Error::from_panic(&*payload)),
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn handler_id(&self) -> HandlerId {
        self.handler_id
    }

    pub fn name(&self) -> &Arc<str> {
        &self.name
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("id", &self.id)
            .field("shape", &self.shape)
            .field("handler_id", &self.handler_id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Tick(u32);
    impl Event for Tick {
        const SHAPE: Shape = Shape::new("tick");
    }

    // Same tag as `Tick`, different type.
    struct FakeTick;
    impl Event for FakeTick {
        const SHAPE: Shape = Shape::new("tick");
    }

    #[test]
    fn narrows_and_invokes() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handler = Handler::new(move |t: &Tick| sink.lock().unwrap().push(t.0));
        let binding = Binding::new(SubscriptionId::new(0), &handler);

        assert!(binding.invoke(&Tick(5)).is_ok());
        assert_eq!(*seen.lock().unwrap(), vec![5]);
        assert_eq!(binding.handler_id(), handler.id());
        assert_eq!(binding.shape(), &Tick::SHAPE);
    }

    #[test]
    fn foreign_type_with_same_tag_is_a_mismatch() {
        let handler = Handler::new(|_: &Tick| {});
        let binding = Binding::new(SubscriptionId::new(0), &handler);

        let err = binding.invoke(&FakeTick).unwrap_err();
        assert_eq!(err.as_label(), "shape_mismatch");
    }

    #[test]
    fn panics_are_converted_to_errors() {
        let handler = Handler::new(|t: &Tick| {
            if t.0 == 0 {
                panic!("zero tick");
            }
        });
        let binding = Binding::new(SubscriptionId::new(0), &handler);

        assert_eq!(
            binding.invoke(&Tick(0)).unwrap_err(),
            Error::Panicked("zero tick".into())
        );
        assert!(binding.invoke(&Tick(1)).is_ok());
    }
}
