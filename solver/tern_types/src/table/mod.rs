//! The type table — single source of truth for all types.
//!
//! Slots live in five parallel arrays indexed by [`TypeId`]:
//! kind tag, cardinality, flags, optional display name, payload.
//! The layout keeps the hot `kind` dispatch dense while the collector and
//! the cardinality queries touch only the arrays they need.
//!
//! Free slots are threaded on an intrusive free list through the `cards`
//! array (a free slot's card field holds the next free id), so reclaimed
//! ids are reused without renumbering anything: ids handed out stay stable
//! for the table's lifetime.

mod construct;

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::cons::{ConsTable, ShapeRef};
use crate::desc::TypeDesc;
use crate::flags::TypeFlags;
use crate::idx::TypeId;
use crate::kind::Kind;
use crate::symtab::SymbolTable;

/// Maximum bitvector width.
pub const MAX_BV_WIDTH: u32 = 1 << 27;

/// Maximum tuple arity and function domain arity.
pub const MAX_ARITY: usize = 65_535;

/// Hard ceiling on the number of slots. Allocation past this is fatal.
pub const MAX_TYPES: u32 = 1 << 30;

/// Default slot capacity for [`TypeTable::new`].
const DEFAULT_CAPACITY: usize = 64;

/// Panic helper for slot exhaustion (cold path, never inlined).
#[cold]
#[inline(never)]
fn panic_table_full(len: usize) -> ! {
    panic!("type table full: {len} slots in use, ceiling is {MAX_TYPES}")
}

/// The type table.
///
/// Owns every descriptor, the hash-cons index, the symbol table, and the
/// join/meet caches. All operations are synchronous and single-threaded;
/// the table is a mutable owned resource of the enclosing solver context.
///
/// Dropping the table releases every payload and name reference.
pub struct TypeTable {
    // === Slot storage (parallel arrays) ===
    /// Kind tag per slot. `Kind::Unused` marks a free slot.
    kinds: Vec<Kind>,
    /// Cardinality per slot, saturated at `u32::MAX`.
    /// For free slots: the raw id of the next free slot.
    cards: Vec<u32>,
    /// Cardinality flags per slot.
    flags: Vec<TypeFlags>,
    /// Display name per slot (the first name ever attached).
    names: Vec<Option<Rc<str>>>,
    /// Payload per slot, owned by the slot.
    descs: Vec<TypeDesc>,

    /// Head of the intrusive free list ([`TypeId::NONE`] when empty).
    free_head: TypeId,
    /// Number of live slots.
    live: u32,

    // === Indexes ===
    /// Structural uniqueness index for compound types.
    pub(crate) cons: ConsTable,
    /// Name bindings with shadowing.
    pub(crate) symtab: SymbolTable,

    // === Lattice memoization ===
    /// `(lo, hi) -> join`, `lo < hi`; `NONE` records incompatibility.
    pub(crate) join_cache: FxHashMap<(TypeId, TypeId), TypeId>,
    /// `(lo, hi) -> meet`, `lo < hi`; `NONE` records incompatibility.
    pub(crate) meet_cache: FxHashMap<(TypeId, TypeId), TypeId>,
}

impl TypeTable {
    /// Create a table with the default capacity and the three primitive
    /// types installed.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a table pre-sized for `capacity` slots.
    ///
    /// The primitives `bool`, `int`, `real` are installed at their fixed
    /// indices; they are never reclaimed.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(TypeId::PRIMITIVE_COUNT as usize);
        let mut table = Self {
            kinds: Vec::with_capacity(capacity),
            cards: Vec::with_capacity(capacity),
            flags: Vec::with_capacity(capacity),
            names: Vec::with_capacity(capacity),
            descs: Vec::with_capacity(capacity),
            free_head: TypeId::NONE,
            live: 0,
            cons: ConsTable::new(),
            symtab: SymbolTable::new(),
            join_cache: FxHashMap::default(),
            meet_cache: FxHashMap::default(),
        };
        table.install_primitives();
        table
    }

    /// Install `bool`, `int`, `real` at indices 0, 1, 2.
    fn install_primitives(&mut self) {
        debug_assert!(self.kinds.is_empty());

        // bool: two values, small and extremal in its own component
        self.push_slot(Kind::Bool, 2, TypeFlags::SMALL_TYPE);
        // int: infinite, a strict subtype of real, so not maximal
        self.push_slot(Kind::Int, u32::MAX, TypeFlags::MINIMAL);
        // real: infinite, a strict supertype of int, so not minimal
        self.push_slot(Kind::Real, u32::MAX, TypeFlags::MAXIMAL);

        debug_assert_eq!(self.kinds.len() as u32, TypeId::PRIMITIVE_COUNT);
    }

    /// Append a fully formed payload-free slot (primitives only).
    fn push_slot(&mut self, kind: Kind, card: u32, flags: TypeFlags) {
        self.kinds.push(kind);
        self.cards.push(card);
        self.flags.push(flags);
        self.names.push(None);
        self.descs.push(TypeDesc::None);
        self.live += 1;
    }

    // === Slot allocation ===

    /// Claim an unused slot: pop the free list or append.
    ///
    /// The returned slot is blank (`Kind::Unused`); the caller fills it.
    ///
    /// # Panics
    /// Panics when the table has reached [`MAX_TYPES`] slots.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "slot count is capped at MAX_TYPES, well inside u32"
    )]
    pub(crate) fn alloc(&mut self) -> TypeId {
        self.live += 1;
        if self.free_head.is_none() {
            let len = self.kinds.len();
            if len >= MAX_TYPES as usize {
                panic_table_full(len);
            }
            self.kinds.push(Kind::Unused);
            self.cards.push(0);
            self.flags.push(TypeFlags::empty());
            self.names.push(None);
            self.descs.push(TypeDesc::None);
            TypeId::from_raw(len as u32)
        } else {
            let id = self.free_head;
            self.free_head = TypeId::from_raw(self.cards[id.index()]);
            self.cards[id.index()] = 0;
            id
        }
    }

    /// Erase a slot and splice it onto the free list.
    ///
    /// Drops the slot's payload and its name reference. The caller must
    /// already have removed any hash-cons entry for the slot.
    pub(crate) fn erase_slot(&mut self, id: TypeId) {
        let i = id.index();
        debug_assert!(self.kinds[i] != Kind::Unused, "double free of {id:?}");
        self.names[i] = None;
        self.descs[i] = TypeDesc::None;
        self.flags[i] = TypeFlags::empty();
        self.kinds[i] = Kind::Unused;
        self.cards[i] = self.free_head.raw();
        self.free_head = id;
        self.live -= 1;
    }

    // === Queries ===

    /// Kind tag of a slot.
    #[inline]
    pub fn kind(&self, id: TypeId) -> Kind {
        self.kinds[id.index()]
    }

    /// Cardinality of a type, saturated at `u32::MAX`.
    ///
    /// # Panics
    /// Panics if `id` is not live (debug builds).
    #[inline]
    pub fn card(&self, id: TypeId) -> u32 {
        debug_assert!(self.is_live(id), "card of dead type {id:?}");
        self.cards[id.index()]
    }

    /// Cardinality flags of a type.
    #[inline]
    pub fn flags(&self, id: TypeId) -> TypeFlags {
        debug_assert!(self.is_live(id), "flags of dead type {id:?}");
        self.flags[id.index()]
    }

    /// Check if `id` denotes a live type in this table.
    #[inline]
    pub fn is_live(&self, id: TypeId) -> bool {
        !id.is_none() && id.index() < self.kinds.len() && self.kinds[id.index()] != Kind::Unused
    }

    /// Number of live types (primitives included).
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live as usize
    }

    /// Number of slots ever allocated (live plus free).
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.kinds.len()
    }

    /// Check if the cardinality of `id` is exact and finite.
    #[inline]
    pub fn is_finite(&self, id: TypeId) -> bool {
        self.flags(id).is_finite()
    }

    /// Check if the cardinality of `id` is exactly 1.
    #[inline]
    pub fn is_unit(&self, id: TypeId) -> bool {
        self.flags(id).is_unit()
    }

    /// Check if the cardinality of `id` is exact and fits in 32 bits.
    #[inline]
    pub fn is_small(&self, id: TypeId) -> bool {
        self.flags(id).is_small()
    }

    /// Check if `id` is maximal in the subtype lattice.
    #[inline]
    pub fn is_maximal(&self, id: TypeId) -> bool {
        self.flags(id).is_maximal()
    }

    /// Check if `id` is minimal in the subtype lattice.
    #[inline]
    pub fn is_minimal(&self, id: TypeId) -> bool {
        self.flags(id).is_minimal()
    }

    // === Payload accessors ===

    /// Width of a bitvector type.
    ///
    /// # Panics
    /// Panics if `id` is not a bitvector type.
    pub fn bv_width(&self, id: TypeId) -> u32 {
        debug_assert_eq!(self.kind(id), Kind::BitVector);
        match &self.descs[id.index()] {
            TypeDesc::BitWidth(w) => *w,
            _ => panic!("bitvector payload missing for {id:?}"),
        }
    }

    /// Cardinality parameter of a scalar type.
    ///
    /// # Panics
    /// Panics if `id` is not a scalar type.
    pub fn scalar_size(&self, id: TypeId) -> u32 {
        debug_assert_eq!(self.kind(id), Kind::Scalar);
        match &self.descs[id.index()] {
            TypeDesc::ScalarSize(size) => *size,
            _ => panic!("scalar payload missing for {id:?}"),
        }
    }

    /// Number of elements of a tuple type.
    ///
    /// # Panics
    /// Panics if `id` is not a tuple type.
    pub fn tuple_arity(&self, id: TypeId) -> usize {
        self.tuple_elems(id).len()
    }

    /// Element `i` of a tuple type.
    ///
    /// # Panics
    /// Panics if `id` is not a tuple type or `i` is out of bounds.
    pub fn tuple_elem(&self, id: TypeId, i: usize) -> TypeId {
        self.tuple_elems(id)[i]
    }

    /// All elements of a tuple type.
    ///
    /// # Panics
    /// Panics if `id` is not a tuple type.
    pub fn tuple_elems(&self, id: TypeId) -> &[TypeId] {
        debug_assert_eq!(self.kind(id), Kind::Tuple);
        match &self.descs[id.index()] {
            TypeDesc::Tuple(elems) => elems,
            _ => panic!("tuple payload missing for {id:?}"),
        }
    }

    /// Domain arity of a function type.
    ///
    /// # Panics
    /// Panics if `id` is not a function type.
    pub fn function_arity(&self, id: TypeId) -> usize {
        self.function_sig(id).len() - 1
    }

    /// Domain of a function type.
    ///
    /// # Panics
    /// Panics if `id` is not a function type.
    pub fn function_domain(&self, id: TypeId) -> &[TypeId] {
        let sig = self.function_sig(id);
        &sig[..sig.len() - 1]
    }

    /// Domain type `i` of a function type.
    ///
    /// # Panics
    /// Panics if `id` is not a function type or `i` is out of bounds.
    pub fn function_domain_at(&self, id: TypeId, i: usize) -> TypeId {
        self.function_domain(id)[i]
    }

    /// Range of a function type.
    ///
    /// # Panics
    /// Panics if `id` is not a function type.
    pub fn function_range(&self, id: TypeId) -> TypeId {
        let sig = self.function_sig(id);
        sig[sig.len() - 1]
    }

    /// Full signature of a function type: domain then range.
    pub(crate) fn function_sig(&self, id: TypeId) -> &[TypeId] {
        debug_assert_eq!(self.kind(id), Kind::Function);
        match &self.descs[id.index()] {
            TypeDesc::Function(sig) => sig,
            _ => panic!("function payload missing for {id:?}"),
        }
    }

    /// Payload of a slot (collector use).
    #[inline]
    pub(crate) fn desc(&self, id: TypeId) -> &TypeDesc {
        &self.descs[id.index()]
    }

    /// Set or clear the transient GC mark on a slot.
    #[inline]
    pub(crate) fn set_mark(&mut self, id: TypeId, on: bool) {
        self.flags[id.index()].set(TypeFlags::GC_MARK, on);
    }

    /// Check the transient GC mark on a slot.
    #[inline]
    pub(crate) fn is_marked(&self, id: TypeId) -> bool {
        self.flags[id.index()].contains(TypeFlags::GC_MARK)
    }

    /// Borrowed hash-cons shape of a live compound type.
    ///
    /// # Panics
    /// Panics if the slot's kind is not hash-consed.
    pub(crate) fn shape_of(&self, id: TypeId) -> ShapeRef<'_> {
        match &self.descs[id.index()] {
            TypeDesc::BitWidth(width) => ShapeRef::BitVector { width: *width },
            TypeDesc::Tuple(elems) => ShapeRef::Tuple { elems },
            TypeDesc::Function(sig) => ShapeRef::Function { sig },
            desc => panic!("no hash-cons shape for {:?} ({desc:?})", self.kind(id)),
        }
    }

    // === Cardinality arithmetic ===

    /// Product of the cardinalities of `elems`, saturated at `u32::MAX`.
    ///
    /// The boolean reports exactness: false once the product reaches the
    /// saturation value (a saturated operand forces saturation).
    #[allow(
        clippy::cast_possible_truncation,
        reason = "accumulator is checked below u32::MAX before the cast"
    )]
    pub(crate) fn sat_product(&self, elems: &[TypeId]) -> (u32, bool) {
        let mut acc: u64 = 1;
        for &t in elems {
            acc *= u64::from(self.card(t));
            if acc >= u64::from(u32::MAX) {
                return (u32::MAX, false);
            }
        }
        (acc as u32, true)
    }

    /// Product of the cardinalities of `elems`, saturated at `u32::MAX`.
    pub fn card_of_product(&self, elems: &[TypeId]) -> u32 {
        self.sat_product(elems).0
    }

    /// Cardinality of a function's domain (product over domain types).
    pub fn card_of_domain(&self, f: TypeId) -> u32 {
        self.sat_product(self.function_domain(f)).0
    }

    /// Cardinality of a function's range.
    pub fn card_of_range(&self, f: TypeId) -> u32 {
        self.card(self.function_range(f))
    }

    /// Check if every domain type of a function is finite.
    pub fn has_finite_domain(&self, f: TypeId) -> bool {
        self.function_domain(f)
            .iter()
            .all(|&d| self.flags(d).is_finite())
    }

    /// Check if a function's range is finite.
    pub fn has_finite_range(&self, f: TypeId) -> bool {
        self.flags(self.function_range(f)).is_finite()
    }

    // === Naming ===

    /// Bind `name` to `id`, shadowing any previous binding of `name`.
    ///
    /// If the type has no display name yet, `name` is also recorded on the
    /// slot. A later `set_name` on the same type binds in the symbol table
    /// but leaves the recorded display name untouched: the *first* name
    /// sticks.
    ///
    /// # Panics
    /// Panics if `id` is not live (debug builds).
    pub fn set_name(&mut self, id: TypeId, name: Rc<str>) {
        debug_assert!(self.is_live(id), "naming dead type {id:?}");
        let slot = &mut self.names[id.index()];
        if slot.is_none() {
            *slot = Some(name.clone());
        }
        self.symtab.bind(name, id);
    }

    /// The type currently bound to `name`, or [`TypeId::NONE`].
    pub fn lookup(&self, name: &str) -> TypeId {
        self.symtab.lookup(name)
    }

    /// Remove the visible binding of `name`, revealing the shadowed one.
    ///
    /// Returns the unbound id, or [`TypeId::NONE`] if nothing was bound.
    pub fn remove_name(&mut self, name: &str) -> TypeId {
        self.symtab.unbind(name)
    }

    /// Display name recorded on the type, if any.
    pub fn name_of(&self, id: TypeId) -> Option<&str> {
        self.names[id.index()].as_deref()
    }

    // === Printing ===

    /// Displayable view of a type.
    ///
    /// Named types print their recorded name; anonymous types print
    /// structurally, e.g. `(-> int (tuple bool (bitvector 8)))`.
    pub fn display(&self, id: TypeId) -> TypeDisplay<'_> {
        TypeDisplay { table: self, id }
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TypeTable {{ {} live, {} slots, {} consed }}",
            self.live,
            self.kinds.len(),
            self.cons.len()
        )
    }
}

/// Display adapter returned by [`TypeTable::display`].
pub struct TypeDisplay<'a> {
    table: &'a TypeTable,
    id: TypeId,
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (table, id) = (self.table, self.id);
        if id.is_none() {
            return write!(f, "<none>");
        }
        if let Some(name) = table.name_of(id) {
            return write!(f, "{name}");
        }
        match table.kind(id) {
            Kind::Unused => write!(f, "<unused>"),
            Kind::Bool => write!(f, "bool"),
            Kind::Int => write!(f, "int"),
            Kind::Real => write!(f, "real"),
            Kind::BitVector => write!(f, "(bitvector {})", table.bv_width(id)),
            Kind::Scalar => write!(f, "(scalar!{} {})", id.raw(), table.scalar_size(id)),
            Kind::Uninterpreted => write!(f, "(sort!{})", id.raw()),
            Kind::Tuple => {
                write!(f, "(tuple")?;
                for &elem in table.tuple_elems(id) {
                    write!(f, " {}", table.display(elem))?;
                }
                write!(f, ")")
            }
            Kind::Function => {
                write!(f, "(->")?;
                for &dom in table.function_domain(id) {
                    write!(f, " {}", table.display(dom))?;
                }
                write!(f, " {})", table.display(table.function_range(id)))
            }
        }
    }
}
