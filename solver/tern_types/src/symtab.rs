//! Name bindings with shadowing.
//!
//! A string-keyed multi-map of binding stacks: rebinding a name pushes a
//! new binding that shadows the previous one, and unbinding pops it back
//! into view. All bindings — shadowed ones included — count as collector
//! roots.
//!
//! Names are reference-counted (`Rc<str>`). The table's map key holds one
//! reference while any binding for the name exists; it is dropped when the
//! last binding is removed. Note the asymmetry with the per-type display
//! name stored on the descriptor: that one records the *first* name a type
//! was ever given and is untouched by rebinding (see
//! [`TypeTable::set_name`](crate::TypeTable::set_name)).

use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::idx::TypeId;

/// Name -> binding-stack map.
#[derive(Default)]
pub(crate) struct SymbolTable {
    /// Binding stacks; the top of each stack is the visible binding.
    /// Stacks are never empty — the entry is removed with its last binding.
    bindings: FxHashMap<Rc<str>, SmallVec<[TypeId; 2]>>,
}

impl SymbolTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Push a binding for `name`, shadowing any current one.
    pub(crate) fn bind(&mut self, name: Rc<str>, id: TypeId) {
        self.bindings.entry(name).or_default().push(id);
    }

    /// The visible binding for `name`, or [`TypeId::NONE`].
    pub(crate) fn lookup(&self, name: &str) -> TypeId {
        match self.bindings.get(name) {
            Some(stack) => *stack.last().unwrap_or(&TypeId::NONE),
            None => TypeId::NONE,
        }
    }

    /// Pop the visible binding for `name`, revealing the shadowed one.
    ///
    /// Returns the popped id, or [`TypeId::NONE`] if the name was unbound.
    /// Dropping the map key with the last binding releases the table's
    /// reference on the name.
    pub(crate) fn unbind(&mut self, name: &str) -> TypeId {
        let Some(stack) = self.bindings.get_mut(name) else {
            return TypeId::NONE;
        };
        let popped = stack.pop().unwrap_or(TypeId::NONE);
        if stack.is_empty() {
            self.bindings.remove(name);
        }
        popped
    }

    /// All bound ids, shadowed bindings included.
    pub(crate) fn bound_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.bindings.values().flat_map(|stack| stack.iter().copied())
    }

    /// Total number of bindings across all names.
    #[cfg(test)]
    pub(crate) fn binding_count(&self) -> usize {
        self.bindings.values().map(SmallVec::len).sum()
    }
}

#[cfg(test)]
mod tests;
