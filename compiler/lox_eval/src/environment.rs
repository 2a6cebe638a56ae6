//! Runtime scope chain.
//!
//! Each frame is a name-to-value map with a link to its enclosing frame.
//! Frames are shared: a closure keeps the frame it was declared in alive,
//! and writes through one holder are seen by every other.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use lox_ir::Name;
use rustc_hash::FxHashMap;

use crate::Value;

/// Single-threaded shared, mutable cell.
///
/// All frame and field-map allocations go through this wrapper.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

/// One frame of bindings.
#[derive(Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<Environment>,
}

/// Handle to a frame in the scope chain.
#[derive(Clone, Default)]
pub struct Environment(LocalScope<Scope>);

impl Environment {
    /// A frame with no parent.
    pub fn global() -> Self {
        Environment::default()
    }

    /// A new frame whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Environment(LocalScope::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        }))
    }

    pub fn parent(&self) -> Option<Environment> {
        self.0.borrow().parent.clone()
    }

    /// Bind `name` in this frame, replacing any earlier binding.
    #[inline]
    pub fn define(&self, name: Name, value: Value) {
        self.0.borrow_mut().bindings.insert(name, value);
    }

    /// Read `name` from this frame only.
    #[inline]
    pub fn get(&self, name: Name) -> Option<Value> {
        self.0.borrow().bindings.get(&name).cloned()
    }

    /// Overwrite an existing binding in this frame. Returns `false` when
    /// the frame has no binding for `name`.
    #[inline]
    pub fn assign(&self, name: Name, value: Value) -> bool {
        match self.0.borrow_mut().bindings.get_mut(&name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// The frame `depth` links up the chain. Depth 0 is `self`.
    pub fn ancestor(&self, depth: u32) -> Option<Environment> {
        let mut env = self.clone();
        for _ in 0..depth {
            env = env.parent()?;
        }
        Some(env)
    }

    pub fn get_at(&self, depth: u32, name: Name) -> Option<Value> {
        self.ancestor(depth)?.get(name)
    }

    pub fn assign_at(&self, depth: u32, name: Name, value: Value) -> bool {
        self.ancestor(depth)
            .is_some_and(|env| env.assign(name, value))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }

    /// Number of bindings in this frame.
    pub fn len(&self) -> usize {
        self.0.borrow().bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Environment {
    // Frames can be reached from values they hold, so only the local names
    // are shown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.0.borrow();
        let mut names: Vec<Name> = scope.bindings.keys().copied().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}
