//! Error and Result types of this crate.
//!
//! Only precondition violations are errors. Ordinary outcomes such as a
//! duplicate insert, an erase miss, or a stale position are reported through
//! `bool`, `Option`, or the end position instead.

use thiserror::Error;

/// Universal error type of this crate.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Error {
    /// `front()`/`back()` (or their `_mut` forms) on a list with no elements.
    #[error("empty container: the list has no elements")]
    EmptyList,
    /// A max load factor that is zero, negative, or not finite.
    #[error("invalid max load factor {0}: must be a positive finite number")]
    InvalidMaxLoadFactor(f32),
}

/// Universal Result type of this crate.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            "empty container: the list has no elements",
            Error::EmptyList.to_string()
        );
        assert_eq!(
            "invalid max load factor -1: must be a positive finite number",
            Error::InvalidMaxLoadFactor(-1.0).to_string()
        );
    }
}
