//! Pre-computed cardinality flags.
//!
//! `TypeFlags` classify each type's cardinality once at construction time,
//! enabling O(1) finiteness and lattice-extremum queries without traversal.
//! Compound types derive their flags from their children; the stored value
//! is always a pure function of the child descriptors.

use bitflags::bitflags;

bitflags! {
    /// Per-type cardinality classification, computed at construction time.
    ///
    /// The low five bits classify the type; the high bit is a transient
    /// mark used only inside a collection cycle and never observable
    /// between public calls.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u8 {
        /// Cardinality is exact and finite.
        const FINITE = 1 << 0;
        /// Cardinality is exactly 1.
        const UNIT = 1 << 1;
        /// Cardinality is exact and fits in 32 bits.
        const SMALL = 1 << 2;
        /// Top of the subtype lattice at this position.
        const MAXIMAL = 1 << 3;
        /// Bottom of the subtype lattice at this position.
        const MINIMAL = 1 << 4;

        /// Transient reachability mark (GC only).
        const GC_MARK = 1 << 7;
    }
}

impl TypeFlags {
    /// The five classification bits, excluding the GC mark.
    pub const CARD_MASK: Self = Self::from_bits_truncate(
        Self::FINITE.bits()
            | Self::UNIT.bits()
            | Self::SMALL.bits()
            | Self::MAXIMAL.bits()
            | Self::MINIMAL.bits(),
    );

    /// Canonical flags for a unit type (cardinality 1).
    pub const UNIT_TYPE: Self = Self::CARD_MASK;

    /// Canonical flags for a small finite type (exact 32-bit cardinality).
    pub const SMALL_TYPE: Self = Self::from_bits_truncate(
        Self::FINITE.bits() | Self::SMALL.bits() | Self::MAXIMAL.bits() | Self::MINIMAL.bits(),
    );

    /// Canonical flags for a large finite type (cardinality saturated).
    pub const LARGE_TYPE: Self =
        Self::from_bits_truncate(Self::FINITE.bits() | Self::MAXIMAL.bits() | Self::MINIMAL.bits());

    /// Canonical flags for an infinite type.
    pub const INFINITE_TYPE: Self =
        Self::from_bits_truncate(Self::MAXIMAL.bits() | Self::MINIMAL.bits());

    /// Check if the cardinality is exact and finite.
    #[inline]
    pub const fn is_finite(self) -> bool {
        self.contains(Self::FINITE)
    }

    /// Check if the cardinality is exactly 1.
    #[inline]
    pub const fn is_unit(self) -> bool {
        self.contains(Self::UNIT)
    }

    /// Check if the cardinality is exact and fits in 32 bits.
    #[inline]
    pub const fn is_small(self) -> bool {
        self.contains(Self::SMALL)
    }

    /// Check if the type is maximal in the subtype lattice.
    #[inline]
    pub const fn is_maximal(self) -> bool {
        self.contains(Self::MAXIMAL)
    }

    /// Check if the type is minimal in the subtype lattice.
    #[inline]
    pub const fn is_minimal(self) -> bool {
        self.contains(Self::MINIMAL)
    }

    /// Combine classification bits from child types (for tuples).
    ///
    /// All five bits propagate by conjunction: a tuple is finite, unit,
    /// small, maximal, or minimal exactly when every element is. The
    /// GC mark never propagates.
    #[inline]
    pub fn conjunction(children: impl IntoIterator<Item = Self>) -> Self {
        let mut acc = Self::CARD_MASK;
        for child in children {
            acc &= child;
        }
        acc
    }
}

#[cfg(test)]
mod tests;
