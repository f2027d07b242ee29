//! Type identifier handle.
//!
//! `TypeId` is THE canonical type representation: a 32-bit index into the
//! type table. Equality of types is index equality — hash consing
//! guarantees that structurally equal compound types share one index.
//!
//! The three primitive types occupy fixed indices known to every caller.

use std::fmt;

/// A 32-bit index into the type table.
///
/// Types are compared by index (O(1)); the table's hash-cons discipline is
/// the sole source of structural equality beyond index identity.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    // === Primitive Types (indices 0-2) ===
    // Installed at table creation, never reclaimed.

    /// The `bool` type.
    pub const BOOL: Self = Self(0);
    /// The `int` type (mathematical integers).
    pub const INT: Self = Self(1);
    /// The `real` type (mathematical reals).
    pub const REAL: Self = Self(2);

    /// Number of pre-installed primitive types.
    pub const PRIMITIVE_COUNT: u32 = 3;

    /// Sentinel value: no type.
    ///
    /// Returned by lattice operations on incompatible pairs and by name
    /// lookups that find nothing. Callers must check with [`is_none`].
    ///
    /// [`is_none`]: Self::is_none
    pub const NONE: Self = Self(u32::MAX);

    /// Create an index from a raw u32 value.
    ///
    /// The caller must ensure the index is valid in the table.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as a usize, for slot array access.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Check if this is one of the three primitive types.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::BOOL => write!(f, "TypeId::BOOL"),
            Self::INT => write!(f, "TypeId::INT"),
            Self::REAL => write!(f, "TypeId::REAL"),
            Self::NONE => write!(f, "TypeId::NONE"),
            _ => write!(f, "TypeId({})", self.0),
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::BOOL => write!(f, "bool"),
            Self::INT => write!(f, "int"),
            Self::REAL => write!(f, "real"),
            Self::NONE => write!(f, "<none>"),
            _ => write!(f, "tau!{}", self.0),
        }
    }
}

// Compile-time size assertion: TypeId must be exactly 4 bytes
const _: () = assert!(std::mem::size_of::<TypeId>() == 4);
