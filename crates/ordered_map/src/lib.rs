//! Sorted associative container with caller-defined element lifecycle.
//!
//! An [`OrderedMap`] keeps its entries in ascending key order and owns every
//! key and value it stores. How elements are copied in, released and ordered
//! is decided by an [`EntryOps`] implementation bound at construction:
//!
//! - [`CloneOps`] uses `Clone` and `Ord` and never fails
//! - [`FnOps`] is assembled from five closures and may report copy failures
//!
//! ```
//! use ordered_map::OrderedMap;
//!
//! let mut scores: OrderedMap<i32, u32> = OrderedMap::new();
//! scores.insert_or_update(&7, &3).unwrap();
//! scores.insert_or_update(&2, &5).unwrap();
//! assert_eq!(scores.keys().copied().collect::<Vec<_>>(), vec![2, 7]);
//! ```

pub mod error;
pub mod map;
pub mod ops;

pub use error::MapError;
pub use map::*;
pub use ops::*;
