use thiserror::Error;

/// Failures reported by [`OrderedMap`](crate::OrderedMap) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// A required entry callback was not supplied at construction.
    #[error("missing `{0}` callback")]
    InvalidConfiguration(&'static str),
    /// The operation cannot be applied to the map in its current state.
    #[error("invalid argument")]
    InvalidArgument,
    /// Copying a key or value (or growing storage) failed.
    #[error("out of memory")]
    OutOfMemory,
    /// No entry compares equal to the given key.
    #[error("item does not exist")]
    ItemNotFound,
}
