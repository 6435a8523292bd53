//! Entry operations: how a map copies, releases and orders its elements.
//!
//! Every map is parameterized by one [`EntryOps`] implementation. The map
//! calls `copy_*` whenever it takes ownership of a caller's element, `free_*`
//! whenever it gives one up, and `compare_keys` for every ordering decision.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::error::MapError;

/// Lifecycle and ordering callbacks for the keys and values of a map.
///
/// `copy_key` and `copy_value` return `None` to signal an allocation failure;
/// the map turns that into [`MapError::OutOfMemory`] and leaves itself
/// untouched. `compare_keys` must be a total order that does not change while
/// the map is alive.
pub trait EntryOps<K, V> {
    fn copy_key(&self, key: &K) -> Option<K>;

    fn copy_value(&self, value: &V) -> Option<V>;

    fn compare_keys(&self, a: &K, b: &K) -> Ordering;

    /// Release a key the map no longer stores.
    fn free_key(&self, key: K) {
        drop(key);
    }

    /// Release a value the map no longer stores.
    fn free_value(&self, value: V) {
        drop(value);
    }
}

/// Operations derived from `Clone` and `Ord`. Copies never fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloneOps;

impl<K: Ord + Clone, V: Clone> EntryOps<K, V> for CloneOps {
    #[inline]
    fn copy_key(&self, key: &K) -> Option<K> {
        Some(key.clone())
    }

    #[inline]
    fn copy_value(&self, value: &V) -> Option<V> {
        Some(value.clone())
    }

    #[inline]
    fn compare_keys(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

type CopyFn<T> = Rc<dyn Fn(&T) -> Option<T>>;
type FreeFn<T> = Rc<dyn Fn(T)>;
type CompareFn<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// Operations assembled from caller-supplied closures.
///
/// Cloning an `FnOps` shares the closures, so a copied map runs exactly the
/// same callbacks as the map it was copied from.
pub struct FnOps<K, V> {
    copy_key: CopyFn<K>,
    copy_value: CopyFn<V>,
    free_key: FreeFn<K>,
    free_value: FreeFn<V>,
    compare_keys: CompareFn<K>,
}

impl<K, V> FnOps<K, V> {
    pub fn builder() -> FnOpsBuilder<K, V> {
        FnOpsBuilder::default()
    }
}

impl<K, V> Clone for FnOps<K, V> {
    fn clone(&self) -> Self {
        Self {
            copy_key: Rc::clone(&self.copy_key),
            copy_value: Rc::clone(&self.copy_value),
            free_key: Rc::clone(&self.free_key),
            free_value: Rc::clone(&self.free_value),
            compare_keys: Rc::clone(&self.compare_keys),
        }
    }
}

impl<K, V> fmt::Debug for FnOps<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOps").finish_non_exhaustive()
    }
}

impl<K, V> EntryOps<K, V> for FnOps<K, V> {
    fn copy_key(&self, key: &K) -> Option<K> {
        (self.copy_key)(key)
    }

    fn copy_value(&self, value: &V) -> Option<V> {
        (self.copy_value)(value)
    }

    fn compare_keys(&self, a: &K, b: &K) -> Ordering {
        (self.compare_keys)(a, b)
    }

    fn free_key(&self, key: K) {
        (self.free_key)(key)
    }

    fn free_value(&self, value: V) {
        (self.free_value)(value)
    }
}

/// Collects the five callbacks of an [`FnOps`].
///
/// [`build`](FnOpsBuilder::build) fails with
/// [`MapError::InvalidConfiguration`] naming the first callback that was
/// never set.
pub struct FnOpsBuilder<K, V> {
    copy_key: Option<CopyFn<K>>,
    copy_value: Option<CopyFn<V>>,
    free_key: Option<FreeFn<K>>,
    free_value: Option<FreeFn<V>>,
    compare_keys: Option<CompareFn<K>>,
}

impl<K, V> Default for FnOpsBuilder<K, V> {
    fn default() -> Self {
        Self {
            copy_key: None,
            copy_value: None,
            free_key: None,
            free_value: None,
            compare_keys: None,
        }
    }
}

impl<K, V> FnOpsBuilder<K, V> {
    pub fn copy_key(mut self, f: impl Fn(&K) -> Option<K> + 'static) -> Self {
        self.copy_key = Some(Rc::new(f));
        self
    }

    pub fn copy_value(mut self, f: impl Fn(&V) -> Option<V> + 'static) -> Self {
        self.copy_value = Some(Rc::new(f));
        self
    }

    pub fn free_key(mut self, f: impl Fn(K) + 'static) -> Self {
        self.free_key = Some(Rc::new(f));
        self
    }

    pub fn free_value(mut self, f: impl Fn(V) + 'static) -> Self {
        self.free_value = Some(Rc::new(f));
        self
    }

    pub fn compare_keys(mut self, f: impl Fn(&K, &K) -> Ordering + 'static) -> Self {
        self.compare_keys = Some(Rc::new(f));
        self
    }

    pub fn build(self) -> Result<FnOps<K, V>, MapError> {
        Ok(FnOps {
            copy_key: self
                .copy_key
                .ok_or(MapError::InvalidConfiguration("copy_key"))?,
            copy_value: self
                .copy_value
                .ok_or(MapError::InvalidConfiguration("copy_value"))?,
            free_key: self
                .free_key
                .ok_or(MapError::InvalidConfiguration("free_key"))?,
            free_value: self
                .free_value
                .ok_or(MapError::InvalidConfiguration("free_value"))?,
            compare_keys: self
                .compare_keys
                .ok_or(MapError::InvalidConfiguration("compare_keys"))?,
        })
    }
}

#[cfg(test)]
#[path = "ops_tests.rs"]
mod ops_tests;
