//! Set of values already confirmed anomalous.

use std::collections::HashSet;

/// Grow-only set of raw values, matched by exact equality.
///
/// Values are keyed by their bit pattern, with `-0.0` folded onto `0.0` so
/// membership agrees with `==`.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    bits: HashSet<u64>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value. Returns `false` if it was already present.
    pub fn insert(&mut self, value: f64) -> bool {
        self.bits.insert(key(value))
    }

    pub fn contains(&self, value: f64) -> bool {
        self.bits.contains(&key(value))
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Whether every value of `self` is also in `other`.
    pub fn is_subset(&self, other: &ExclusionSet) -> bool {
        self.bits.is_subset(&other.bits)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.bits.iter().map(|&b| f64::from_bits(b))
    }
}

fn key(value: f64) -> u64 {
    if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl FromIterator<f64> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}
