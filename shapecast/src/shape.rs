use std::{borrow::Cow, fmt};

/// Stable routing tag for an event type.
///
/// Every [`Event`](crate::Event) declares exactly one shape. The dispatcher
/// keys its registry by shape, so two events are delivered to the same
/// handlers if and only if their shapes compare equal.
///
/// Shapes are plain strings rather than compiler type identities. They are
/// stable across builds, printable in diagnostics and can be serialized
/// (with the `serde` feature).
///
/// Shapes are usually declared as constants:
///
/// ```rust
/// use shapecast::Shape;
///
/// const SCORE_CHANGED: Shape = Shape::new("score_changed");
/// assert_eq!(SCORE_CHANGED.as_str(), "score_changed");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Shape(Cow<'static, str>);

impl Shape {
    /// Create a shape from a static tag. Usable in `const` context.
    pub const fn new(tag: &'static str) -> Self {
        Shape(Cow::Borrowed(tag))
    }

    /// Create a shape from a tag only known at runtime.
    pub fn owned(tag: impl Into<String>) -> Self {
        Shape(Cow::Owned(tag.into()))
    }

    /// Returns the tag of this shape.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Shape {
    fn from(tag: &'static str) -> Self {
        Shape::new(tag)
    }
}

impl From<String> for Shape {
    fn from(tag: String) -> Self {
        Shape::owned(tag)
    }
}

impl AsRef<str> for Shape {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
