use std::any::Any;

use crate::Shape;

/// Trait for values that can be dispatched.
///
/// Each event type declares its [`Shape`]. Handlers subscribe to a concrete
/// event type and receive every dispatched event whose shape matches.
/// There is no hierarchy: a handler for one shape never sees events of
/// another shape, even when the two types have identical fields.
///
/// Events must be `Send + Sync + 'static` because a [`Dispatcher`](crate::Dispatcher)
/// may be shared across threads and handlers narrow the event through
/// [`Any`].
///
/// # Example
///
/// ```rust
/// use shapecast::{Event, Shape};
///
/// #[derive(Debug, Clone)]
/// struct PlayerJoined {
///     name: String,
/// }
///
/// impl Event for PlayerJoined {
///     const SHAPE: Shape = Shape::new("player_joined");
/// }
///
/// assert_eq!(PlayerJoined::SHAPE.as_str(), "player_joined");
/// ```
pub trait Event: Any + Send + Sync {
    /// Routing tag shared by every value of this type.
    const SHAPE: Shape;
}

/// Object-safe view of an [`Event`].
///
/// Blanket-implemented for every event type. Use it to keep events of
/// different shapes in one collection and hand them to
/// [`Dispatcher::dispatch_dyn`](crate::Dispatcher::dispatch_dyn).
///
/// ```rust
/// # use shapecast::{AnyEvent, Event, Shape};
/// # struct A; impl Event for A { const SHAPE: Shape = Shape::new("a"); }
/// # struct B; impl Event for B { const SHAPE: Shape = Shape::new("b"); }
/// let queue: Vec<Box<dyn AnyEvent>> = vec![Box::new(A), Box::new(B)];
/// let shapes: Vec<_> = queue.iter().map(|e| e.shape()).collect();
/// assert_eq!(shapes, [Shape::new("a"), Shape::new("b")]);
/// ```
pub trait AnyEvent: Send + Sync {
    /// Shape of the concrete event.
    fn shape(&self) -> Shape;

    /// The concrete event, for narrowing.
    fn as_any(&self) -> &dyn Any;

    /// Rust type name of the concrete event, used in diagnostics.
    fn type_name(&self) -> &'static str;
}

impl<E: Event> AnyEvent for E {
    fn shape(&self) -> Shape {
        E::SHAPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<E>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping;
    impl Event for Ping {
        const SHAPE: Shape = Shape::new("ping");
    }

    struct Pong(u8);
    impl Event for Pong {
        const SHAPE: Shape = Shape::new("pong");
    }

    #[test]
    fn any_event_reports_declared_shape() {
        let ev: Box<dyn AnyEvent> = Box::new(Ping);
        assert_eq!(ev.shape(), Shape::new("ping"));
        assert!(ev.type_name().ends_with("Ping"));
    }

    #[test]
    fn any_event_narrows_to_concrete_type() {
        let ev: Box<dyn AnyEvent> = Box::new(Pong(7));
        let pong = ev.as_any().downcast_ref::<Pong>().map(|p| p.0);
        assert_eq!(pong, Some(7));
        assert!(ev.as_any().downcast_ref::<Ping>().is_none());
    }
}
