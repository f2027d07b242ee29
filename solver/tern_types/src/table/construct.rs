//! Type constructors and flag/cardinality derivation.
//!
//! Bitvector, tuple, and function types are hash-consed: equal inputs
//! return the same id for the table's lifetime (or until a collection
//! reclaims the type). Scalar and uninterpreted sorts are nominal —
//! every call mints a fresh id, even for equal parameters.
//!
//! Cardinalities saturate at `u32::MAX`; the `SMALL` flag records whether
//! the stored value is still exact.

use smallvec::SmallVec;

use crate::cons::ShapeRef;
use crate::desc::TypeDesc;
use crate::flags::TypeFlags;
use crate::idx::TypeId;
use crate::kind::Kind;
use crate::table::{TypeTable, MAX_ARITY, MAX_BV_WIDTH};

/// `base ^ exp`, saturated at `u32::MAX`.
///
/// Only called with `2 <= base` and `1 <= exp < 32`, so the accumulator
/// stays below `2^64` between saturation checks.
#[allow(
    clippy::cast_possible_truncation,
    reason = "accumulator is checked below u32::MAX before the cast"
)]
fn sat_power(base: u32, exp: u32) -> (u32, bool) {
    debug_assert!(base >= 2 && (1..32).contains(&exp));
    let mut acc: u64 = 1;
    for _ in 0..exp {
        acc *= u64::from(base);
        if acc >= u64::from(u32::MAX) {
            return (u32::MAX, false);
        }
    }
    (acc as u32, true)
}

impl TypeTable {
    /// The bitvector type of the given width. Hash-consed.
    ///
    /// # Panics
    /// Panics if `width` is zero or exceeds [`MAX_BV_WIDTH`].
    pub fn bitvector(&mut self, width: u32) -> TypeId {
        assert!(
            (1..=MAX_BV_WIDTH).contains(&width),
            "bitvector width out of range: {width}"
        );

        let shape = ShapeRef::BitVector { width };
        let hash = shape.hash();
        if let Some(id) = self.find_consed(hash, shape) {
            return id;
        }

        let (card, flags) = if width < 32 {
            (1_u32 << width, TypeFlags::SMALL_TYPE)
        } else {
            (u32::MAX, TypeFlags::LARGE_TYPE)
        };

        let id = self.alloc();
        self.fill_slot(id, Kind::BitVector, card, flags, TypeDesc::BitWidth(width));
        self.cons.insert(hash, id);
        tracing::trace!(id = id.raw(), width, "new bitvector type");
        id
    }

    /// A fresh scalar sort of the given cardinality. Nominal: two scalar
    /// sorts of equal size are distinct types.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn new_scalar(&mut self, size: u32) -> TypeId {
        assert!(size >= 1, "scalar size must be positive");

        let flags = if size == 1 {
            TypeFlags::UNIT_TYPE
        } else {
            TypeFlags::SMALL_TYPE
        };

        let id = self.alloc();
        self.fill_slot(id, Kind::Scalar, size, flags, TypeDesc::ScalarSize(size));
        id
    }

    /// A fresh uninterpreted sort. Nominal and infinite.
    pub fn new_uninterpreted(&mut self) -> TypeId {
        let id = self.alloc();
        self.fill_slot(
            id,
            Kind::Uninterpreted,
            u32::MAX,
            TypeFlags::INFINITE_TYPE,
            TypeDesc::None,
        );
        id
    }

    /// The tuple type over `elems`. Hash-consed.
    ///
    /// All five cardinality bits propagate by conjunction over the
    /// elements; the cardinality is the saturated product of the element
    /// cardinalities, and saturation clears `SMALL`.
    ///
    /// # Panics
    /// Panics if the arity is zero or exceeds [`MAX_ARITY`], or if an
    /// element id is dead (debug builds).
    pub fn tuple(&mut self, elems: &[TypeId]) -> TypeId {
        assert!(
            (1..=MAX_ARITY).contains(&elems.len()),
            "tuple arity out of range: {}",
            elems.len()
        );
        debug_assert!(
            elems.iter().all(|&t| self.is_live(t)),
            "tuple over a dead element type"
        );

        let shape = ShapeRef::Tuple { elems };
        let hash = shape.hash();
        if let Some(id) = self.find_consed(hash, shape) {
            return id;
        }

        let mut flags = TypeFlags::conjunction(elems.iter().map(|&t| self.flags(t)));
        let (card, exact) = self.sat_product(elems);
        if !exact {
            flags.remove(TypeFlags::SMALL);
        }

        let id = self.alloc();
        self.fill_slot(id, Kind::Tuple, card, flags, TypeDesc::Tuple(elems.into()));
        self.cons.insert(hash, id);
        tracing::trace!(id = id.raw(), arity = elems.len(), "new tuple type");
        id
    }

    /// The total function type `domain -> range`. Hash-consed.
    ///
    /// `UNIT`, `MAXIMAL`, `MINIMAL` come from the range alone. The type is
    /// finite iff the range is unit, or the range and every domain type
    /// are finite. The cardinality is `card(range) ^ card(domain)` when
    /// that is exactly representable, else saturated.
    ///
    /// # Panics
    /// Panics if the domain arity is zero or exceeds [`MAX_ARITY`], or if
    /// any id is dead (debug builds).
    pub fn function(&mut self, domain: &[TypeId], range: TypeId) -> TypeId {
        assert!(
            (1..=MAX_ARITY).contains(&domain.len()),
            "function arity out of range: {}",
            domain.len()
        );
        debug_assert!(
            self.is_live(range) && domain.iter().all(|&t| self.is_live(t)),
            "function over a dead type"
        );

        let mut sig: SmallVec<[TypeId; 8]> = SmallVec::with_capacity(domain.len() + 1);
        sig.extend_from_slice(domain);
        sig.push(range);

        let shape = ShapeRef::Function { sig: &sig };
        let hash = shape.hash();
        if let Some(id) = self.find_consed(hash, shape) {
            return id;
        }

        let (card, flags) = self.function_card_flags(domain, range);

        let id = self.alloc();
        self.fill_slot(
            id,
            Kind::Function,
            card,
            flags,
            TypeDesc::Function(sig.as_slice().into()),
        );
        self.cons.insert(hash, id);
        tracing::trace!(id = id.raw(), arity = domain.len(), "new function type");
        id
    }

    /// Derive a function type's cardinality and flags from its signature.
    fn function_card_flags(&self, domain: &[TypeId], range: TypeId) -> (u32, TypeFlags) {
        let range_flags = self.flags(range);

        // Range alone decides the extremal bits: the domain is fixed under
        // hash consing, so only range variance is visible to the lattice.
        let mut flags =
            range_flags & (TypeFlags::UNIT | TypeFlags::MAXIMAL | TypeFlags::MINIMAL);

        let finite = range_flags.is_unit()
            || (range_flags.is_finite()
                && domain.iter().all(|&d| self.flags(d).is_finite()));

        let (card, exact) = if range_flags.is_unit() {
            // Exactly one total function into a unit range.
            (1, true)
        } else if range_flags.is_small()
            && domain.iter().all(|&d| self.flags(d).is_small())
        {
            let (dom_card, dom_exact) = self.sat_product(domain);
            if !dom_exact || dom_card >= 32 {
                // range >= 2, so 2^32 already exceeds the card field.
                (u32::MAX, false)
            } else {
                sat_power(self.card(range), dom_card)
            }
        } else {
            (u32::MAX, false)
        };

        if finite {
            flags |= TypeFlags::FINITE;
        }
        if exact {
            flags |= TypeFlags::SMALL;
        }
        (card, flags)
    }

    /// Look up a shape in the hash-cons index.
    fn find_consed(&self, hash: u32, shape: ShapeRef<'_>) -> Option<TypeId> {
        self.cons.find(hash, |cand| {
            shape.matches(self.kind(cand), self.desc(cand))
        })
    }

    /// Fill a freshly allocated slot.
    fn fill_slot(&mut self, id: TypeId, kind: Kind, card: u32, flags: TypeFlags, desc: TypeDesc) {
        let i = id.index();
        debug_assert_eq!(self.kinds[i], Kind::Unused, "slot {id:?} already in use");
        self.kinds[i] = kind;
        self.cards[i] = card;
        self.flags[i] = flags;
        self.descs[i] = desc;
    }
}
