//! Typed, immutable per-request attributes.
//!
//! A [`TypedAttributes`] store maps [`TypedKey<T>`] to values of type `T`.
//! Stores are never mutated in place: [`TypedAttributes::with`] returns a
//! new store and leaves the original untouched, so a store can be shared
//! freely across tasks without locking.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A key addressing a value of type `T` in a [`TypedAttributes`] store.
///
/// Keys are identified by their name together with their value type, so two
/// keys with the same name but different types address different slots.
///
/// # Examples
///
/// ```
/// use guarded_action::{TypedAttributes, TypedKey};
///
/// const TENANT: TypedKey<String> = TypedKey::new("tenant");
///
/// let attrs = TypedAttributes::new().with(&TENANT, "acme".to_string());
/// assert_eq!(attrs.get(&TENANT).map(String::as_str), Some("acme"));
/// ```
pub struct TypedKey<T> {
    name: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> TypedKey<T> {
    /// Creates a key with the given display name.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _value: PhantomData,
        }
    }

    /// Returns the key's name.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: 'static> TypedKey<T> {
    fn slot(&self) -> Slot {
        Slot {
            name: self.name,
            type_id: TypeId::of::<T>(),
        }
    }
}

// Manual impls: deriving would put bounds on `T`.
impl<T> Clone for TypedKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedKey<T> {}

impl<T> fmt::Debug for TypedKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedKey").field(&self.name).finish()
    }
}

impl<T> fmt::Display for TypedKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Slot {
    name: &'static str,
    type_id: TypeId,
}

/// Immutable, copy-on-write attribute store.
///
/// Cloning a store is cheap: the underlying map is shared until the next
/// [`with`](Self::with), which copies the map (the values themselves stay
/// shared) and inserts the new entry.
#[derive(Clone, Default)]
pub struct TypedAttributes {
    entries: Arc<HashMap<Slot, Arc<dyn Any + Send + Sync>>>,
}

impl TypedAttributes {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`, if any.
    pub fn get<T>(&self, key: &TypedKey<T>) -> Option<&T>
    where
        T: Send + Sync + 'static,
    {
        self.entries
            .get(&key.slot())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Returns a new store with `key` set to `value`.
    ///
    /// Any previous value for `key` is replaced; all other entries are kept.
    /// `self` is left unchanged.
    #[must_use]
    pub fn with<T>(&self, key: &TypedKey<T>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        let mut entries = (*self.entries).clone();
        entries.insert(key.slot(), Arc::new(value));
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Returns true if a value is stored under `key`.
    pub fn contains<T>(&self, key: &TypedKey<T>) -> bool
    where
        T: Send + Sync + 'static,
    {
        self.entries.contains_key(&key.slot())
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for TypedAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values are type-erased; only key names are shown.
        f.debug_set()
            .entries(self.entries.keys().map(|slot| slot.name))
            .finish()
    }
}
