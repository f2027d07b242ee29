//! Hash-cons index for compound types.
//!
//! Maps the structural hash of a bitvector, tuple, or function shape to the
//! ids carrying that shape. Hashing is only a fast path: candidates are
//! always compared structurally against the query, so a hash collision
//! costs a bucket scan, never a wrong answer.
//!
//! Queries are borrowed shapes ([`ShapeRef`]) rather than allocated
//! descriptors, so a lookup that hits never allocates. Each shape hashes
//! under its own seed: a bitvector of width `w` and a one-element tuple
//! holding id `w` occupy different hash families.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tern_hash::hash_words;

use crate::desc::TypeDesc;
use crate::idx::TypeId;
use crate::kind::Kind;

/// Seed for bitvector shapes.
const BV_SEED: u32 = 0x5851_f42d;
/// Seed for tuple shapes.
const TUPLE_SEED: u32 = 0x9e37_79b9;
/// Seed for function shapes.
const FUNCTION_SEED: u32 = 0x85eb_ca6b;

/// A borrowed view of a hash-consable shape.
#[derive(Copy, Clone, Debug)]
pub(crate) enum ShapeRef<'a> {
    /// Bitvector of the given width.
    BitVector { width: u32 },
    /// Tuple with the given element types.
    Tuple { elems: &'a [TypeId] },
    /// Function signature: domain types followed by the range type.
    Function { sig: &'a [TypeId] },
}

impl ShapeRef<'_> {
    /// Structural hash of this shape.
    pub(crate) fn hash(&self) -> u32 {
        match *self {
            Self::BitVector { width } => hash_words(&[width], BV_SEED),
            Self::Tuple { elems } => hash_ids(elems, TUPLE_SEED),
            Self::Function { sig } => hash_ids(sig, FUNCTION_SEED),
        }
    }

    /// Check whether a candidate slot holds exactly this shape.
    pub(crate) fn matches(&self, kind: Kind, desc: &TypeDesc) -> bool {
        match (*self, kind, desc) {
            (Self::BitVector { width }, Kind::BitVector, TypeDesc::BitWidth(w)) => width == *w,
            (Self::Tuple { elems }, Kind::Tuple, TypeDesc::Tuple(ids)) => elems == &ids[..],
            (Self::Function { sig }, Kind::Function, TypeDesc::Function(ids)) => sig == &ids[..],
            _ => false,
        }
    }
}

/// Hash a sequence of type ids under a shape seed.
fn hash_ids(ids: &[TypeId], seed: u32) -> u32 {
    let words: SmallVec<[u32; 16]> = ids.iter().map(|id| id.raw()).collect();
    hash_words(&words, seed)
}

/// The hash-cons index.
///
/// Holds ids only — slot descriptors own the payloads. Contains exactly one
/// entry per live compound id and none for primitives, nominal types, or
/// freed slots.
#[derive(Default)]
pub(crate) struct ConsTable {
    /// Structural hash -> candidate ids. Collisions share a bucket.
    buckets: FxHashMap<u32, SmallVec<[TypeId; 1]>>,
    /// Total number of indexed ids.
    len: usize,
}

impl ConsTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Find the id whose slot satisfies `matches`, among candidates with
    /// the given structural hash.
    pub(crate) fn find(&self, hash: u32, matches: impl Fn(TypeId) -> bool) -> Option<TypeId> {
        self.buckets
            .get(&hash)?
            .iter()
            .copied()
            .find(|&id| matches(id))
    }

    /// Index a freshly constructed compound id under its structural hash.
    pub(crate) fn insert(&mut self, hash: u32, id: TypeId) {
        self.buckets.entry(hash).or_default().push(id);
        self.len += 1;
    }

    /// Remove an id from the bucket for `hash`.
    ///
    /// Returns true if the id was present. The empty bucket is dropped so
    /// the map does not accumulate tombstones across collection cycles.
    pub(crate) fn remove(&mut self, hash: u32, id: TypeId) -> bool {
        let Some(bucket) = self.buckets.get_mut(&hash) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|&cand| cand == id) else {
            return false;
        };
        bucket.swap_remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(&hash);
        }
        self.len -= 1;
        true
    }

    /// Number of indexed ids.
    pub(crate) fn len(&self) -> usize {
        self.len
    }
}
