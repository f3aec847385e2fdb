//! Compact binary vectors over field indices.
//!
//! Every per-field `{0,1}` vector in the model (the planted / detasseled /
//! harvested flags and the three action vectors) is a [`FieldSet`]: bit `i`
//! is entry `i` of the vector. The field count itself is carried by the
//! problem, not by the set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest supported field count.
///
/// Candidate action vectors are enumerated over all `2^N` subsets, so the
/// bound is set well below the 32 bits the representation could hold.
pub const MAX_FIELDS: usize = 16;

/// A set of field indices, equivalently a binary vector of length N.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldSet(u32);

impl FieldSet {
    /// The all-zero vector.
    pub const EMPTY: FieldSet = FieldSet(0);

    /// Creates a set from raw bits.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Creates a set containing every index in `0..n`.
    pub fn all(n: usize) -> Self {
        assert!(n <= MAX_FIELDS, "field count {n} exceeds {MAX_FIELDS}");
        Self(((1u64 << n) - 1) as u32)
    }

    /// Creates a set from field indices.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        indices.into_iter().fold(Self::EMPTY, |s, i| s.with(i))
    }

    /// Creates a set from an explicit `{0,1}` vector.
    pub fn from_binary(entries: &[u8]) -> Self {
        Self::from_indices(
            entries
                .iter()
                .enumerate()
                .filter(|(_, &e)| e != 0)
                .map(|(i, _)| i),
        )
    }

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns a copy with index `i` set.
    #[inline]
    pub fn with(self, i: usize) -> Self {
        assert!(i < MAX_FIELDS, "field index {i} out of range");
        Self(self.0 | (1 << i))
    }

    /// Whether index `i` is set.
    #[inline]
    pub fn contains(self, i: usize) -> bool {
        i < 32 && self.0 & (1 << i) != 0
    }

    /// Number of set entries (the vector sum).
    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether this is the all-zero vector.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Entries set here but not in `other`.
    #[inline]
    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    #[inline]
    pub fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    #[inline]
    pub fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    /// Whether every set index is below `n`.
    #[inline]
    pub fn fits(self, n: usize) -> bool {
        n >= 32 || self.0 >> n == 0
    }

    /// Set indices in ascending order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..32).filter(move |&i| self.contains(i))
    }

    /// Explicit `{0,1}` vector of length `n`.
    pub fn to_binary(self, n: usize) -> Vec<u8> {
        (0..n).map(|i| u8::from(self.contains(i))).collect()
    }

    /// All `2^n` subsets in lexicographic order of their `{0,1}` vectors,
    /// field 0 most significant: `(0,..,0,0)`, `(0,..,0,1)`, `(0,..,1,0)`, ...
    ///
    /// The empty set comes first and `{n-1}` second.
    pub fn all_subsets(n: usize) -> impl Iterator<Item = FieldSet> {
        assert!(n <= MAX_FIELDS, "field count {n} exceeds {MAX_FIELDS}");
        (0..(1u32 << n)).map(move |m| match n {
            0 => Self::EMPTY,
            _ => Self(m.reverse_bits() >> (32 - n)),
        })
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (k, i) in self.iter().enumerate() {
            if k > 0 {
                write!(f, ",")?;
            }
            write!(f, "{i}")?;
        }
        write!(f, "}}")
    }
}
