//! Ready-to-use monitor implementations.
//!
//! # Available Monitors
//!
//! - [`Tracer`] - Logs dispatcher activity via the `tracing` crate
//! - [`ShapeMonitor`] - Counts dispatches, failures and live subscriptions per shape
//!
//! # Example
//!
//! ```rust
//! use shapecast::{Dispatcher, monitors::Tracer};
//!
//! let dispatcher = Dispatcher::new();
//! dispatcher.monitors().add(Tracer);
//! ```

mod tracer;
pub use tracer::Tracer;

mod shape_monitor;
pub use shape_monitor::ShapeMonitor;
