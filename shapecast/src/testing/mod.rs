//! Test helpers for asserting on delivery and failures.
//!
//! Enable with the `test-harness` feature:
//!
//! ```toml
//! [dev-dependencies]
//! shapecast = { version = "0.1", features = ["test-harness"] }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use shapecast::{Dispatcher, IntValue};
//! use shapecast::testing::{FailureLog, Recorder};
//!
//! let dispatcher = Dispatcher::new();
//! let failures = FailureLog::new();
//! dispatcher.monitors().add(failures.clone());
//!
//! let recorder = Recorder::<IntValue>::new();
//! dispatcher.subscribe(recorder.handler());
//!
//! dispatcher.dispatch(&IntValue::new(1));
//! assert_eq!(recorder.values(), vec![IntValue::new(1)]);
//! assert!(failures.is_empty());
//! ```
//!
//! # Warning
//!
//! **Do not use in production.** Recorders keep every event they receive.

mod failure_log;
mod recorder;

pub use failure_log::FailureLog;
pub use recorder::Recorder;
