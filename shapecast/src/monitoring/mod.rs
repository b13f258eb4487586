//! Hooks for observing subscriptions, dispatches and handler failures.
//!
//! Handler failures never reach the caller of
//! [`Dispatcher::dispatch`](crate::Dispatcher::dispatch). Register a
//! [`Monitor`] to see them (and the rest of the dispatcher's activity)
//! for diagnostics, metrics or logging.
//!
//! # Example
//!
//! ```rust
//! use shapecast::Dispatcher;
//! use shapecast::monitoring::{HandlerFailure, Monitor};
//!
//! struct FailurePrinter;
//!
//! impl Monitor for FailurePrinter {
//!     fn on_handler_failed(&self, failure: &HandlerFailure) {
//!         eprintln!("[failed] {} on {}: {}", failure.handler(), failure.shape(), failure.error());
//!     }
//! }
//!
//! let dispatcher = Dispatcher::new();
//! let id = dispatcher.monitors().add(FailurePrinter);
//! assert!(dispatcher.monitors().remove(id));
//! ```

mod handler_failure;
mod monitor;
mod registry;

/// Unique identifier for a registered monitor.
///
/// Ids are never reused within one registry.
pub type MonitorId = u64;

pub use handler_failure::{HandlerFailure, Removal};
pub use monitor::Monitor;
pub use registry::MonitorRegistry;
