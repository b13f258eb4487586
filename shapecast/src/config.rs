use crate::FailurePolicy;

/// Dispatcher configuration.
///
/// Use the builder methods to customize, or [`Default`] for the standard
/// behaviour.
///
/// # Examples
///
/// ```rust
/// use shapecast::{Config, Dispatcher, FailurePolicy};
///
/// let config = Config::default()
///     .with_failure_policy(FailurePolicy::Retain)   // keep failing handlers
///     .with_shape_capacity(16);                     // expect many handlers per shape
///
/// let dispatcher = Dispatcher::with_config(config);
/// assert!(dispatcher.config().failure_policy().is_retain());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    failure_policy: FailurePolicy,

    /// Initial capacity of each per-shape handler list.
    /// Default: 4
    shape_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            failure_policy: FailurePolicy::default(),
            shape_capacity: 4,
        }
    }
}

impl Config {
    /// Set what happens to handlers that fail during dispatch.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Returns the failure policy.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Set the initial capacity of each per-shape handler list.
    pub fn with_shape_capacity(mut self, capacity: usize) -> Self {
        self.shape_capacity = capacity;
        self
    }

    /// Returns the initial capacity of each per-shape handler list.
    pub fn shape_capacity(&self) -> usize {
        self.shape_capacity
    }
}
