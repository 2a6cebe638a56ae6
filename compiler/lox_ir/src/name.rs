//! Handle to an interned string.

use std::fmt;

/// Position of a string in its [`StringInterner`](crate::StringInterner)'s
/// table.
///
/// Used for identifiers, string literal contents and property names. Two
/// names are equal exactly when their text is equal, as long as both came
/// from the same interner. Handles are handed out in intern order, and the
/// empty string always sits at index 0.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    pub const EMPTY: Name = Name(0);

    #[inline]
    pub const fn from_index(index: u32) -> Self {
        Name(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name(#{})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_is_default() {
        assert_eq!(Name::default(), Name::EMPTY);
        assert_eq!(Name::EMPTY.index(), 0);
    }

    #[test]
    fn test_debug_shows_index() {
        assert_eq!(format!("{:?}", Name::from_index(17)), "Name(#17)");
    }
}
