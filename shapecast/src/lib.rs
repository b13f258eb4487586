#![cfg_attr(docsrs, feature(doc_cfg))]
//! # Shapecast
//!
//! A synchronous, in-process publish/subscribe dispatcher keyed by event shape.
//!
//! Handlers subscribe to one event type. Any code holding the
//! [`Dispatcher`] can dispatch an event, which calls every handler
//! subscribed to that event's [`Shape`], in subscription order, before
//! `dispatch` returns. There is no queue, no background task and no
//! cross-process delivery.
//!
//! ## Quick Start
//!
//! ```rust
//! use shapecast::{Dispatcher, Event, Handler, Shape};
//!
//! #[derive(Debug, Clone)]
//! struct PlayerJoined {
//!     name: String,
//! }
//!
//! impl Event for PlayerJoined {
//!     const SHAPE: Shape = Shape::new("player_joined");
//! }
//!
//! let dispatcher = Dispatcher::new();
//!
//! let greeter = Handler::named("greeter", |e: &PlayerJoined| {
//!     println!("Hello, {}!", e.name);
//! });
//! dispatcher.subscribe(&greeter);
//!
//! dispatcher.dispatch(&PlayerJoined { name: "World".into() });
//! dispatcher.unsubscribe(&greeter);
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Event`] | Trait for dispatchable types; declares the event's [`Shape`] |
//! | [`Shape`] | Stable routing tag; the registry key |
//! | [`Handler`] | Cloneable callback for one event type; its identity is the subscription key |
//! | [`Dispatcher`] | The registry: subscribe, unsubscribe, dispatch |
//! | [`SubscriptionId`] | Token for one registration, usable with [`Dispatcher::cancel`] |
//! | [`Delivery`] | Summary of one dispatch |
//! | [`FailurePolicy`] | What happens to a handler that fails |
//! | [`IntValue`], [`FloatValue`] | Built-in single-value shapes, see [`value_event!`] |
//!
//! ## Failing handlers
//!
//! A handler fails when it returns `Err`, panics, or receives an event it
//! cannot accept (two types declaring the same shape tag). The failure is
//! caught at the dispatch boundary: the remaining handlers still run, the
//! caller of `dispatch` sees nothing, and under the default
//! [`FailurePolicy::Unsubscribe`] the failing handler is removed from its
//! shape. Register a [`Monitor`](monitoring::Monitor) to observe failures:
//!
//! ```rust
//! use shapecast::{Dispatcher, monitors::Tracer};
//!
//! let dispatcher = Dispatcher::new();
//! dispatcher.monitors().add(Tracer); // logs failures at WARN via `tracing`
//! ```
//!
//! ## Features
//!
//! - **`serde`** - Serialize/Deserialize for [`Shape`], [`Config`], ids and the built-in value events
//! - **`test-harness`** - [`testing::Recorder`] and [`testing::FailureLog`] for asserting on delivery
//!
//! ## Examples
//!
//! - `hello-world.rs` - value events, failing handlers and monitors

mod config;
mod delivery;
mod dispatch_id;
mod dispatcher;
mod error;
mod event;
mod failure_policy;
mod handler;
mod shape;
mod subscription_id;
mod value;

mod internal;

pub mod monitoring;
pub mod monitors;

#[cfg(any(test, feature = "test-harness"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-harness")))]
pub mod testing;

pub use config::Config;
pub use delivery::Delivery;
pub use dispatch_id::DispatchId;
pub use dispatcher::Dispatcher;
pub use error::{BoxError, Error};
pub use event::{AnyEvent, Event};
pub use failure_policy::FailurePolicy;
pub use handler::{Handler, HandlerId, IntoHandlerResult};
pub use shape::Shape;
pub use subscription_id::SubscriptionId;
pub use value::{FloatValue, IntValue, ValueEvent};

/// Convenience alias for `Result<T, shapecast::Error>`.
pub type Result<T = ()> = std::result::Result<T, Error>;
