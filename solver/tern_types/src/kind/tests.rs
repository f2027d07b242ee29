use super::*;

#[test]
fn hash_consed_kinds() {
    assert!(Kind::BitVector.is_hash_consed());
    assert!(Kind::Tuple.is_hash_consed());
    assert!(Kind::Function.is_hash_consed());

    assert!(!Kind::Bool.is_hash_consed());
    assert!(!Kind::Scalar.is_hash_consed());
    assert!(!Kind::Uninterpreted.is_hash_consed());
    assert!(!Kind::Unused.is_hash_consed());
}

#[test]
fn nominal_kinds() {
    assert!(Kind::Scalar.is_nominal());
    assert!(Kind::Uninterpreted.is_nominal());

    assert!(!Kind::BitVector.is_nominal());
    assert!(!Kind::Tuple.is_nominal());
}

#[test]
fn kinds_with_children() {
    assert!(Kind::Tuple.has_children());
    assert!(Kind::Function.has_children());

    assert!(!Kind::BitVector.has_children());
    assert!(!Kind::Real.has_children());
}

#[test]
fn display_matches_name() {
    assert_eq!(Kind::Bool.to_string(), "bool");
    assert_eq!(Kind::Function.to_string(), "function");
    assert_eq!(format!("{:?}", Kind::Tuple), "Kind::tuple");
}
