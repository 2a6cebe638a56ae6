//! Arena indices and ranges for the flat syntax tree.
//!
//! Nodes reference their children through `u32` indices into an
//! [`ExprArena`](crate::ExprArena) instead of boxes. Child lists are
//! contiguous ranges into the arena's list storage.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Sentinel value for ids that do not point into an arena.
            pub const INVALID: $name = $name(u32::MAX);

            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Index into the owning arena vector.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", stringify!($name), self.0)
                } else {
                    write!(f, "{}::INVALID", stringify!($name))
                }
            }
        }
    };
}

macro_rules! define_range {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        pub struct $name {
            pub start: u32,
            pub len: u32,
        }

        impl $name {
            pub const EMPTY: $name = $name { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u32) -> Self {
                $name { start, len }
            }

            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }

            /// Slice bounds into the arena's list storage.
            #[inline]
            pub const fn bounds(&self) -> std::ops::Range<usize> {
                self.start as usize..(self.start as usize + self.len as usize)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}..{})", stringify!($name), self.start, self.start + self.len)
            }
        }
    };
}

define_id!(
    /// Index of an expression in the arena. Also the node identity key of the
    /// resolver's hop-count table.
    ExprId
);
define_id!(
    /// Index of a statement in the arena.
    StmtId
);
define_id!(
    /// Index of a function declaration (free function or method).
    FunctionId
);

define_range!(
    /// Range of expressions: call arguments, comma-group members.
    ExprRange
);
define_range!(
    /// Range of statements: block bodies, function bodies.
    StmtRange
);
define_range!(
    /// Range of function declarations: a class's methods.
    FunctionRange
);
