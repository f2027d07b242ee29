//! Join and meet over the subtype lattice.
//!
//! The subtype relation is reflexive, `int <= real`, tuples lift
//! covariantly componentwise, and functions are invariant in the domain
//! and covariant in the range. Every other pair of distinct types is
//! incomparable.
//!
//! `join` returns the least common supertype, `meet` the greatest common
//! subtype; both return [`TypeId::NONE`] for incompatible pairs. Results —
//! including incompatibilities — are memoized per table, keyed by the
//! ordered id pair. Negative memoization is load-bearing: repeated
//! compatibility probes over incompatible pairs must stay cheap.
//!
//! Both operations may create intermediate types (the lifted tuple or
//! function results); that is part of the contract.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::idx::TypeId;
use crate::kind::Kind;
use crate::table::TypeTable;

/// Which lattice bound to compute. Join and meet share one skeleton.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Bound {
    /// Least upper bound.
    Join,
    /// Greatest lower bound.
    Meet,
}

impl TypeTable {
    /// Least common supertype of `t1` and `t2`, or [`TypeId::NONE`].
    pub fn join(&mut self, t1: TypeId, t2: TypeId) -> TypeId {
        self.bound(t1, t2, Bound::Join)
    }

    /// Greatest common subtype of `t1` and `t2`, or [`TypeId::NONE`].
    pub fn meet(&mut self, t1: TypeId, t2: TypeId) -> TypeId {
        self.bound(t1, t2, Bound::Meet)
    }

    /// Check whether `t1` is a subtype of `t2`.
    ///
    /// May create intermediate types, like [`join`](Self::join).
    pub fn is_subtype(&mut self, t1: TypeId, t2: TypeId) -> bool {
        self.join(t1, t2) == t2
    }

    /// Check whether `t1` and `t2` have a common supertype.
    pub fn is_compatible(&mut self, t1: TypeId, t2: TypeId) -> bool {
        !self.join(t1, t2).is_none()
    }

    /// Shared join/meet skeleton: cheap path, cache, recursive lift.
    fn bound(&mut self, t1: TypeId, t2: TypeId, which: Bound) -> TypeId {
        debug_assert!(
            self.is_live(t1) && self.is_live(t2),
            "lattice query over dead types"
        );

        if let Some(result) = self.bound_cheap(t1, t2, which) {
            return result;
        }

        // Join and meet are symmetric; normalize the cache key.
        let key = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        if let Some(&cached) = self.cache(which).get(&key) {
            return cached;
        }

        // The cheap path has resolved everything except same-kind,
        // same-arity tuple and function pairs.
        let result = match self.kind(key.0) {
            Kind::Tuple => self.bound_tuples(key.0, key.1, which),
            Kind::Function => self.bound_functions(key.0, key.1, which),
            kind => unreachable!("cheap path missed kind {kind:?}"),
        };

        self.cache_mut(which).insert(key, result);
        result
    }

    /// Resolve every pair that needs no recursion.
    ///
    /// Returns `None` exactly when both ids are tuples of equal arity or
    /// functions of equal arity — the cases the deep path handles.
    fn bound_cheap(&self, t1: TypeId, t2: TypeId, which: Bound) -> Option<TypeId> {
        if t1 == t2 {
            return Some(t1);
        }

        // The one primitive subtyping axiom: int <= real.
        let int_real = (t1 == TypeId::INT && t2 == TypeId::REAL)
            || (t1 == TypeId::REAL && t2 == TypeId::INT);
        if int_real {
            return Some(match which {
                Bound::Join => TypeId::REAL,
                Bound::Meet => TypeId::INT,
            });
        }

        let (k1, k2) = (self.kind(t1), self.kind(t2));
        if k1 != k2 {
            return Some(TypeId::NONE);
        }
        match k1 {
            Kind::Tuple if self.tuple_arity(t1) == self.tuple_arity(t2) => None,
            Kind::Function if self.function_arity(t1) == self.function_arity(t2) => None,
            // Distinct leaves (bitvectors of different widths, distinct
            // scalar or uninterpreted sorts) and arity mismatches.
            _ => Some(TypeId::NONE),
        }
    }

    /// Componentwise bound of two equal-arity tuples.
    fn bound_tuples(&mut self, t1: TypeId, t2: TypeId, which: Bound) -> TypeId {
        let arity = self.tuple_arity(t1);
        let mut lifted: SmallVec<[TypeId; 8]> = SmallVec::with_capacity(arity);
        for i in 0..arity {
            let (a, b) = (self.tuple_elem(t1, i), self.tuple_elem(t2, i));
            let bound = self.bound(a, b, which);
            if bound.is_none() {
                return TypeId::NONE;
            }
            lifted.push(bound);
        }
        self.tuple(&lifted)
    }

    /// Range-lifted bound of two equal-arity functions.
    ///
    /// Functions are invariant in the domain: the domains must agree
    /// element for element (hash consing makes that an id comparison).
    fn bound_functions(&mut self, t1: TypeId, t2: TypeId, which: Bound) -> TypeId {
        if self.function_domain(t1) != self.function_domain(t2) {
            return TypeId::NONE;
        }
        let domain: SmallVec<[TypeId; 8]> = SmallVec::from_slice(self.function_domain(t1));
        let (r1, r2) = (self.function_range(t1), self.function_range(t2));
        let range = self.bound(r1, r2, which);
        if range.is_none() {
            return TypeId::NONE;
        }
        self.function(&domain, range)
    }

    fn cache(&self, which: Bound) -> &FxHashMap<(TypeId, TypeId), TypeId> {
        match which {
            Bound::Join => &self.join_cache,
            Bound::Meet => &self.meet_cache,
        }
    }

    fn cache_mut(&mut self, which: Bound) -> &mut FxHashMap<(TypeId, TypeId), TypeId> {
        match which {
            Bound::Join => &mut self.join_cache,
            Bound::Meet => &mut self.meet_cache,
        }
    }
}

#[cfg(test)]
mod tests;
