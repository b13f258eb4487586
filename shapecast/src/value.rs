//! Built-in single-value event shapes.
//!
//! [`IntValue`] and [`FloatValue`] carry one numeric payload and cover simple
//! "value changed" notifications. They are shapes of their own and can be
//! dispatched directly, but most applications declare a dedicated shape per
//! value with [`value_event!`](crate::value_event), so that (for example)
//! health and score updates never reach each other's handlers.

use std::fmt;

use crate::{Event, Shape};

/// Events that carry a single value.
pub trait ValueEvent: Event {
    /// Payload type.
    type Value: Copy + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// Build an event from its payload.
    fn from_value(value: Self::Value) -> Self;

    /// Returns the payload.
    fn value(&self) -> Self::Value;
}

/// Generic integer-valued event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntValue {
    pub value: i32,
}

impl IntValue {
    pub fn new(value: i32) -> Self {
        Self { value }
    }
}

impl Event for IntValue {
    const SHAPE: Shape = Shape::new("int_value");
}

impl ValueEvent for IntValue {
    type Value = i32;

    fn from_value(value: i32) -> Self {
        Self::new(value)
    }

    fn value(&self) -> i32 {
        self.value
    }
}

/// Generic float-valued event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatValue {
    pub value: f32,
}

impl FloatValue {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl Event for FloatValue {
    const SHAPE: Shape = Shape::new("float_value");
}

impl ValueEvent for FloatValue {
    type Value = f32;

    fn from_value(value: f32) -> Self {
        Self::new(value)
    }

    fn value(&self) -> f32 {
        self.value
    }
}

/// Declare an application shape that wraps one of the built-in value events.
///
/// The generated type is a newtype over the base event with its own
/// [`Shape`], plus [`ValueEvent`], `From<payload>` and `Deref` to the base.
/// The payload type is spelled out after the base (`IntValue: i32`) and must
/// match the base's [`ValueEvent::Value`].
///
/// ```rust
/// use shapecast::{Event, IntValue, FloatValue, ValueEvent, value_event};
///
/// value_event! {
///     /// Player health changed.
///     pub struct HealthChanged(IntValue: i32) = "health_changed";
/// }
/// value_event!(pub struct SpeedChanged(FloatValue: f32) = "speed_changed");
///
/// let ev = HealthChanged::from(75);
/// assert_eq!(ev.value(), 75);
/// assert_eq!(HealthChanged::SHAPE.as_str(), "health_changed");
/// assert_ne!(HealthChanged::SHAPE, IntValue::SHAPE);
/// assert_eq!(SpeedChanged::from(0.5).value, 0.5);
/// ```
#[macro_export]
macro_rules! value_event {
    ($(#[$meta:meta])* $vis:vis struct $name:ident($base:ty : $value:ty) = $tag:literal $(;)?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Default)]
        $vis struct $name(pub $base);

        impl $crate::Event for $name {
            const SHAPE: $crate::Shape = $crate::Shape::new($tag);
        }

        impl $crate::ValueEvent for $name {
            type Value = $value;

            fn from_value(value: $value) -> Self {
                $name(<$base as $crate::ValueEvent>::from_value(value))
            }

            fn value(&self) -> $value {
                <$base as $crate::ValueEvent>::value(&self.0)
            }
        }

        impl ::core::convert::From<$value> for $name {
            fn from(value: $value) -> Self {
                <$name as $crate::ValueEvent>::from_value(value)
            }
        }

        impl ::core::ops::Deref for $name {
            type Target = $base;

            fn deref(&self) -> &$base {
                &self.0
            }
        }
    };
}
