use pretty_assertions::assert_eq;

use crate::idx::TypeId;
use crate::table::TypeTable;

#[test]
fn join_and_meet_are_reflexive() {
    let mut table = TypeTable::new();
    let bv8 = table.bitvector(8);

    for id in [TypeId::BOOL, TypeId::INT, TypeId::REAL, bv8] {
        assert_eq!(table.join(id, id), id);
        assert_eq!(table.meet(id, id), id);
    }
}

#[test]
fn int_and_real_bound_to_real_and_int() {
    let mut table = TypeTable::new();

    assert_eq!(table.join(TypeId::INT, TypeId::REAL), TypeId::REAL);
    assert_eq!(table.join(TypeId::REAL, TypeId::INT), TypeId::REAL);
    assert_eq!(table.meet(TypeId::INT, TypeId::REAL), TypeId::INT);
    assert_eq!(table.meet(TypeId::REAL, TypeId::INT), TypeId::INT);
}

#[test]
fn distinct_kinds_are_incompatible() {
    let mut table = TypeTable::new();
    let bv8 = table.bitvector(8);

    assert!(table.join(TypeId::BOOL, TypeId::INT).is_none());
    assert!(table.join(bv8, TypeId::REAL).is_none());
    assert!(table.meet(bv8, TypeId::BOOL).is_none());
}

#[test]
fn distinct_leaves_of_equal_kind_are_incompatible() {
    let mut table = TypeTable::new();
    let bv8 = table.bitvector(8);
    let bv16 = table.bitvector(16);
    let s = table.new_scalar(2);
    let t = table.new_scalar(2);
    let u = table.new_uninterpreted();
    let v = table.new_uninterpreted();

    assert!(table.join(bv8, bv16).is_none());
    assert!(table.join(s, t).is_none());
    assert!(table.join(u, v).is_none());
    assert!(table.meet(s, t).is_none());
}

#[test]
fn tuples_lift_componentwise() {
    let mut table = TypeTable::new();
    let ir = table.tuple(&[TypeId::INT, TypeId::REAL]);
    let ri = table.tuple(&[TypeId::REAL, TypeId::INT]);
    let rr = table.tuple(&[TypeId::REAL, TypeId::REAL]);
    let ii = table.tuple(&[TypeId::INT, TypeId::INT]);

    assert_eq!(table.join(ir, ri), rr);
    assert_eq!(table.meet(ir, ri), ii);
    assert!(table.is_subtype(ii, ir));
    assert!(table.is_subtype(ir, rr));
}

#[test]
fn tuple_arity_mismatch_is_incompatible() {
    let mut table = TypeTable::new();
    let one = table.tuple(&[TypeId::INT]);
    let two = table.tuple(&[TypeId::INT, TypeId::INT]);

    assert!(table.join(one, two).is_none());
}

#[test]
fn tuple_with_incompatible_component_is_incompatible() {
    let mut table = TypeTable::new();
    let a = table.tuple(&[TypeId::INT, TypeId::BOOL]);
    let b = table.tuple(&[TypeId::REAL, TypeId::INT]);

    assert!(table.join(a, b).is_none());
    assert!(table.meet(a, b).is_none());
}

#[test]
fn functions_are_covariant_in_the_range() {
    let mut table = TypeTable::new();
    let f_int = table.function(&[TypeId::INT], TypeId::INT);
    let f_real = table.function(&[TypeId::INT], TypeId::REAL);

    assert_eq!(table.join(f_int, f_real), f_real);
    assert_eq!(table.meet(f_int, f_real), f_int);
    assert!(table.is_subtype(f_int, f_real));
    assert!(!table.is_subtype(f_real, f_int));
}

#[test]
fn functions_are_invariant_in_the_domain() {
    let mut table = TypeTable::new();
    let from_int = table.function(&[TypeId::INT], TypeId::BOOL);
    let from_real = table.function(&[TypeId::REAL], TypeId::BOOL);

    assert!(table.join(from_int, from_real).is_none());
    assert!(table.meet(from_int, from_real).is_none());
}

#[test]
fn lattice_results_may_create_types() {
    let mut table = TypeTable::new();
    let ir = table.tuple(&[TypeId::INT, TypeId::REAL]);
    let ri = table.tuple(&[TypeId::REAL, TypeId::INT]);

    let before = table.live_count();
    let joined = table.join(ir, ri);
    assert!(table.is_live(joined));
    assert_eq!(table.live_count(), before + 1);
    assert_eq!(table.tuple_elems(joined), &[TypeId::REAL, TypeId::REAL]);
}

#[test]
fn subtype_is_transitive_through_lifted_types() {
    let mut table = TypeTable::new();
    let ii = table.tuple(&[TypeId::INT, TypeId::INT]);
    let ir = table.tuple(&[TypeId::INT, TypeId::REAL]);
    let rr = table.tuple(&[TypeId::REAL, TypeId::REAL]);

    assert!(table.is_subtype(ii, ir));
    assert!(table.is_subtype(ir, rr));
    assert!(table.is_subtype(ii, rr));
}

#[test]
fn compatibility_reflects_join() {
    let mut table = TypeTable::new();
    assert!(table.is_compatible(TypeId::INT, TypeId::REAL));
    assert!(!table.is_compatible(TypeId::INT, TypeId::BOOL));
}

#[test]
fn results_are_memoized_with_ordered_keys() {
    let mut table = TypeTable::new();
    let ir = table.tuple(&[TypeId::INT, TypeId::REAL]);
    let ri = table.tuple(&[TypeId::REAL, TypeId::INT]);
    let rr = table.join(ir, ri);

    let key = if ir < ri { (ir, ri) } else { (ri, ir) };
    assert_eq!(table.join_cache.get(&key), Some(&rr));

    // The symmetric call hits the same entry; no reversed key appears.
    assert_eq!(table.join(ri, ir), rr);
    assert_eq!(table.join_cache.len(), 1);
}

#[test]
fn incompatibility_is_memoized() {
    let mut table = TypeTable::new();
    let a = table.tuple(&[TypeId::INT, TypeId::BOOL]);
    let b = table.tuple(&[TypeId::REAL, TypeId::INT]);

    assert!(!table.is_compatible(a, b));
    let key = if a < b { (a, b) } else { (b, a) };
    assert_eq!(table.join_cache.get(&key), Some(&TypeId::NONE));

    // Second probe answers from the cache.
    assert!(!table.is_compatible(a, b));
    assert_eq!(table.join_cache.len(), 1);
}

#[test]
fn cheap_pairs_are_not_cached() {
    let mut table = TypeTable::new();
    let bv8 = table.bitvector(8);

    let _ = table.join(TypeId::INT, TypeId::REAL);
    let _ = table.join(bv8, bv8);
    let _ = table.meet(TypeId::BOOL, bv8);

    assert!(table.join_cache.is_empty());
    assert!(table.meet_cache.is_empty());
}
