use super::*;

#[test]
fn canonical_combinations_nest() {
    // unit ⊂ small ⊂ large ⊂ infinite, in terms of cleared bits
    assert!(TypeFlags::UNIT_TYPE.contains(TypeFlags::SMALL_TYPE));
    assert!(TypeFlags::SMALL_TYPE.contains(TypeFlags::LARGE_TYPE));
    assert!(TypeFlags::LARGE_TYPE.contains(TypeFlags::INFINITE_TYPE));
}

#[test]
fn unit_implies_small_and_finite() {
    let f = TypeFlags::UNIT_TYPE;
    assert!(f.is_unit());
    assert!(f.is_small());
    assert!(f.is_finite());
    assert!(f.is_maximal());
    assert!(f.is_minimal());
}

#[test]
fn infinite_is_neither_finite_nor_small() {
    let f = TypeFlags::INFINITE_TYPE;
    assert!(!f.is_finite());
    assert!(!f.is_small());
    assert!(!f.is_unit());
}

#[test]
fn conjunction_of_nothing_is_full_mask() {
    assert_eq!(TypeFlags::conjunction([]), TypeFlags::CARD_MASK);
}

#[test]
fn conjunction_intersects_all_children() {
    let combined = TypeFlags::conjunction([TypeFlags::SMALL_TYPE, TypeFlags::INFINITE_TYPE]);
    assert_eq!(combined, TypeFlags::INFINITE_TYPE);

    // int (minimal only) against real (maximal only) leaves nothing
    let int_like = TypeFlags::MINIMAL;
    let real_like = TypeFlags::MAXIMAL;
    assert_eq!(
        TypeFlags::conjunction([int_like, real_like]),
        TypeFlags::empty()
    );
}

#[test]
fn gc_mark_never_propagates() {
    let marked = TypeFlags::SMALL_TYPE | TypeFlags::GC_MARK;
    let combined = TypeFlags::conjunction([marked, TypeFlags::SMALL_TYPE]);
    assert!(!combined.contains(TypeFlags::GC_MARK));
    assert_eq!(combined, TypeFlags::SMALL_TYPE);
}
