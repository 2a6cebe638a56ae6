//! String interner for identifier and string-literal storage.
//!
//! One table behind a `RwLock`: a hash map from text to [`Name`] and a
//! vector from [`Name`] back to text. Strings are leaked on first intern, so
//! lookups hand out `&'static str` and names stay valid for the process.
//! Only identifiers and string literal contents are interned; other lexemes
//! are sliced from the source when needed.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

struct Table {
    names: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

/// String interner.
///
/// Lookups take the read lock, so the evaluator resolving names never waits
/// on anything but a concurrent intern of a new string.
pub struct StringInterner {
    table: RwLock<Table>,
}

impl StringInterner {
    /// Create an interner holding only the empty string.
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut names = FxHashMap::default();
        names.insert(empty, Name::EMPTY);
        StringInterner {
            table: RwLock::new(Table {
                names,
                strings: vec![empty],
            }),
        }
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&name) = self.table.read().names.get(s) {
            return name;
        }

        let mut table = self.table.write();
        // Another writer may have interned it between the two locks.
        if let Some(&name) = table.names.get(s) {
            return name;
        }

        let index = u32::try_from(table.strings.len())
            .unwrap_or_else(|_| panic!("string interner is full"));
        let name = Name::from_index(index);
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        table.strings.push(leaked);
        table.names.insert(leaked, name);
        name
    }

    /// Look up the string for a Name. Unknown names read as `""`.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared interner handle.
///
/// A session owns one of these and hands clones to each run, so names
/// interned by earlier REPL lines resolve to the same handles later on.
#[derive(Clone)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests;
