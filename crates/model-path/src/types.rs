//! Type definitions for model paths.

use std::borrow::Cow;
use std::fmt;

use crate::util::is_valid_index;

/// A step in a model path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A property name. Digit-only names also address sequence positions.
    Key(String),
    /// A bracketed position, `[n]`.
    Index(usize),
    /// The unresolved collection marker, `[]`.
    Wildcard,
}

/// A parsed model path.
pub type Path = Vec<Segment>;

impl Segment {
    /// The sequence position this segment addresses, if any.
    ///
    /// `Key("2")` and `Index(2)` both address position 2; keys with leading
    /// zeros (`"02"`) do not.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(i) => Some(*i),
            Segment::Key(k) if is_valid_index(k) => k.parse().ok(),
            _ => None,
        }
    }

    /// The map key this segment addresses. `None` for the wildcard.
    pub fn as_key(&self) -> Option<Cow<'_, str>> {
        match self {
            Segment::Key(k) => Some(Cow::Borrowed(k.as_str())),
            Segment::Index(i) => Some(Cow::Owned(i.to_string())),
            Segment::Wildcard => None,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard)
    }

    /// Compares two segments by the location they address, so that
    /// `Key("1")` matches `Index(1)`.
    pub fn addresses_same(&self, other: &Segment) -> bool {
        match (self, other) {
            (Segment::Wildcard, Segment::Wildcard) => true,
            (Segment::Wildcard, _) | (_, Segment::Wildcard) => false,
            (a, b) => a.as_key() == b.as_key(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => write!(f, "{k}"),
            Segment::Index(i) => write!(f, "{i}"),
            Segment::Wildcard => write!(f, "[]"),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}
