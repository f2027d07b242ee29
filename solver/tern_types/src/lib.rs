//! Type table for the Tern solver.
//!
//! First-order types — `bool`, `int`, `real`, fixed-width bitvectors,
//! finite scalar sorts, uninterpreted sorts, tuples, and total functions —
//! stored in one hash-consed table and referenced by 32-bit [`TypeId`]
//! handles.
//!
//! # Design
//!
//! - Structurally equal compound types share one id (hash consing), so
//!   type equality is index comparison.
//! - Cardinality classification is computed once per type and cached in a
//!   flag byte: O(1) finiteness queries without traversal.
//! - `join`/`meet` answer subtype-lattice queries with memoization,
//!   including negative results.
//! - Unreachable types are reclaimed by an explicit mark-and-sweep pass;
//!   ids are reused but never renumbered.
//!
//! The table is single-threaded by design: one mutable table per solver
//! context, no internal locking.

mod cons;
mod desc;
mod flags;
mod gc;
mod idx;
mod kind;
mod lattice;
mod symtab;
mod table;

pub use desc::TypeDesc;
pub use flags::TypeFlags;
pub use idx::TypeId;
pub use kind::Kind;
pub use table::{TypeDisplay, TypeTable, MAX_ARITY, MAX_BV_WIDTH, MAX_TYPES};

// Size assertions to prevent accidental regressions.
// TypeId is stored in bulk (descriptors, caches, cons buckets).
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Kind, TypeId};
    const _: () = assert!(std::mem::size_of::<TypeId>() == 4);
    const _: () = assert!(std::mem::size_of::<Kind>() == 1);
    const _: () = assert!(std::mem::size_of::<Option<std::rc::Rc<str>>>() == 16);
}
