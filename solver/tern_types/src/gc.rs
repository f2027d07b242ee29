//! Mark-and-sweep reclamation of unreachable types.
//!
//! Roots are the symbol table (every binding, shadowed ones included), the
//! three primitives, and any ids pinned through [`TypeTable::mark`] by
//! external structures (terms, assertions, models). Marks propagate over
//! tuple elements and function signatures with an explicit work stack;
//! unmarked slots are then erased, their hash-cons entries removed, and
//! their ids spliced onto the free list. Lattice cache entries touching a
//! reclaimed id are evicted in the same cycle.
//!
//! Marks are transient: the sweep clears every mark bit, so external pins
//! apply to the next collection only and must be re-established each cycle.

use smallvec::SmallVec;

use crate::idx::TypeId;
use crate::kind::Kind;
use crate::table::TypeTable;

impl TypeTable {
    /// Pin `id` as a root for the next [`gc`](Self::gc) cycle.
    ///
    /// # Panics
    /// Panics if `id` is not live (debug builds).
    pub fn mark(&mut self, id: TypeId) {
        debug_assert!(self.is_live(id), "marking dead type {id:?}");
        self.set_mark(id, true);
    }

    /// Collect every type not reachable from a root.
    ///
    /// Callers must have pinned externally held types with
    /// [`mark`](Self::mark) before calling; the table itself contributes
    /// the symbol table bindings and the primitives.
    pub fn gc(&mut self) {
        self.mark_roots();
        self.propagate_marks();
        let reclaimed = self.sweep();
        self.purge_bound_caches();
        tracing::debug!(
            reclaimed,
            live = self.live_count(),
            "type table collection cycle"
        );
    }

    /// Mark the symbol table bindings and the primitives.
    fn mark_roots(&mut self) {
        let bound: Vec<TypeId> = self.symtab.bound_ids().collect();
        for id in bound {
            self.set_mark(id, true);
        }
        for raw in 0..TypeId::PRIMITIVE_COUNT {
            self.set_mark(TypeId::from_raw(raw), true);
        }
    }

    /// Extend marks over everything reachable from a marked id.
    ///
    /// Plain worklist traversal. Ids do not order the reachability graph
    /// here — a recycled slot can hold a parent whose id is smaller than
    /// its children's — so the stack runs until fixpoint instead of
    /// leaning on construction order.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "slot count is capped at MAX_TYPES, well inside u32"
    )]
    fn propagate_marks(&mut self) {
        let mut stack: Vec<TypeId> = (0..self.slot_count() as u32)
            .map(TypeId::from_raw)
            .filter(|&id| self.is_marked(id))
            .collect();

        while let Some(id) = stack.pop() {
            if !self.kind(id).has_children() {
                continue;
            }
            let children: SmallVec<[TypeId; 8]> = SmallVec::from_slice(self.desc(id).children());
            for child in children {
                if !self.is_marked(child) {
                    self.set_mark(child, true);
                    stack.push(child);
                }
            }
        }
    }

    /// Erase every unmarked non-primitive slot; clear marks on survivors.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "slot count is capped at MAX_TYPES, well inside u32"
    )]
    fn sweep(&mut self) -> usize {
        let mut reclaimed = 0;
        for raw in 0..self.slot_count() as u32 {
            let id = TypeId::from_raw(raw);
            if self.kind(id) == Kind::Unused {
                continue;
            }
            if self.is_marked(id) {
                self.set_mark(id, false);
                continue;
            }
            debug_assert!(!id.is_primitive(), "primitive escaped the root set");
            // The descriptor is still intact here; use it to locate the
            // hash-cons entry before erasing.
            if self.kind(id).is_hash_consed() {
                let hash = self.shape_of(id).hash();
                let removed = self.cons.remove(hash, id);
                debug_assert!(removed, "missing hash-cons entry for {id:?}");
            }
            self.erase_slot(id);
            reclaimed += 1;
        }
        reclaimed
    }

    /// Drop join/meet cache entries that touch a reclaimed id.
    ///
    /// A memoized incompatibility (`NONE` value) survives as long as both
    /// key ids do.
    fn purge_bound_caches(&mut self) {
        let mut join_cache = std::mem::take(&mut self.join_cache);
        join_cache.retain(|&(lo, hi), value| {
            self.is_live(lo) && self.is_live(hi) && (value.is_none() || self.is_live(*value))
        });
        self.join_cache = join_cache;

        let mut meet_cache = std::mem::take(&mut self.meet_cache);
        meet_cache.retain(|&(lo, hi), value| {
            self.is_live(lo) && self.is_live(hi) && (value.is_none() || self.is_live(*value))
        });
        self.meet_cache = meet_cache;
    }
}
