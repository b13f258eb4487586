use std::fmt;

/// Identifier of one [`Dispatcher::dispatch`](crate::Dispatcher::dispatch) call.
///
/// Lets monitors correlate the failures reported during a dispatch with the
/// dispatch itself. Ids are assigned in dispatch order and are unique within
/// one dispatcher (clones included); two independent dispatchers both start
/// at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchId(u64);

impl DispatchId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<DispatchId> for u64 {
    fn from(value: DispatchId) -> Self {
        value.0
    }
}

impl fmt::Display for DispatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dispatch-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_value() {
        let id = DispatchId::new(42);
        assert_eq!(id.to_string(), "dispatch-42");
        assert_eq!(id.value(), 42);
        assert_eq!(u64::from(id), 42);
    }

    #[test]
    fn ordered_by_value() {
        assert!(DispatchId::new(1) < DispatchId::new(2));
    }
}
