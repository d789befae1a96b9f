//! Construction-time configuration for `ChainedHashSet`.

use crate::error::{Error, Result};

/// Bucket count of a default-constructed set.
pub const DEFAULT_BUCKET_COUNT: usize = 8;

/// Max load factor of a default-constructed set.
pub const DEFAULT_MAX_LOAD_FACTOR: f32 = 1.0;

/// Initial shape of a set: how many buckets it starts with and the ratio of
/// elements to buckets that triggers growth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SetConfig {
    pub initial_buckets: usize,
    pub max_load_factor: f32,
}

impl SetConfig {
    pub const fn new() -> Self {
        Self {
            initial_buckets: DEFAULT_BUCKET_COUNT,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }

    pub fn with_initial_buckets(mut self, buckets: usize) -> Self {
        self.initial_buckets = buckets;
        self
    }

    pub fn with_max_load_factor(mut self, max_load_factor: f32) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    /// Checks the max load factor. A bucket count of zero is not an error;
    /// it is clamped to one when the set is built.
    pub fn validate(&self) -> Result<()> {
        validate_max_load_factor(self.max_load_factor)
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.initial_buckets.max(1)
    }
}

impl Default for SetConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn validate_max_load_factor(m: f32) -> Result<()> {
    if m.is_finite() && m > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidMaxLoadFactor(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let c = SetConfig::default();
        assert_eq!(c.initial_buckets, DEFAULT_BUCKET_COUNT);
        assert_eq!(c.max_load_factor, DEFAULT_MAX_LOAD_FACTOR);
        assert!(c.validate().is_ok());
    }

    /// Invariant: only positive finite load factors pass validation.
    #[test]
    fn rejects_degenerate_load_factors() {
        for bad in [0.0, -0.5, f32::NAN, f32::INFINITY] {
            let c = SetConfig::new().with_max_load_factor(bad);
            assert!(matches!(c.validate(), Err(Error::InvalidMaxLoadFactor(_))));
        }
        assert!(SetConfig::new().with_max_load_factor(0.25).validate().is_ok());
    }

    #[test]
    fn zero_buckets_clamped_to_one() {
        let c = SetConfig::new().with_initial_buckets(0);
        assert_eq!(c.bucket_count(), 1);
        assert_eq!(SetConfig::new().with_initial_buckets(3).bucket_count(), 3);
    }
}
