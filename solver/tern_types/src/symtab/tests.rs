use std::rc::Rc;

use super::*;

#[test]
fn lookup_of_unbound_name_is_none() {
    let symtab = SymbolTable::new();
    assert!(symtab.lookup("x").is_none());
}

#[test]
fn bind_and_lookup() {
    let mut symtab = SymbolTable::new();
    symtab.bind(Rc::from("x"), TypeId::INT);
    symtab.bind(Rc::from("y"), TypeId::REAL);

    assert_eq!(symtab.lookup("x"), TypeId::INT);
    assert_eq!(symtab.lookup("y"), TypeId::REAL);
    assert!(symtab.lookup("z").is_none());
}

#[test]
fn rebinding_shadows_and_unbinding_reveals() {
    let mut symtab = SymbolTable::new();
    symtab.bind(Rc::from("x"), TypeId::INT);
    symtab.bind(Rc::from("x"), TypeId::REAL);
    assert_eq!(symtab.lookup("x"), TypeId::REAL);
    assert_eq!(symtab.binding_count(), 2);

    assert_eq!(symtab.unbind("x"), TypeId::REAL);
    assert_eq!(symtab.lookup("x"), TypeId::INT);

    assert_eq!(symtab.unbind("x"), TypeId::INT);
    assert!(symtab.lookup("x").is_none());
    assert!(symtab.unbind("x").is_none());
    assert_eq!(symtab.binding_count(), 0);
}

#[test]
fn map_key_reference_released_with_last_binding() {
    let name: Rc<str> = Rc::from("point");
    assert_eq!(Rc::strong_count(&name), 1);

    let mut symtab = SymbolTable::new();
    symtab.bind(name.clone(), TypeId::BOOL);
    assert_eq!(Rc::strong_count(&name), 2);

    // Shadowing reuses the existing key; no extra reference.
    symtab.bind(name.clone(), TypeId::INT);
    assert_eq!(Rc::strong_count(&name), 2);

    symtab.unbind("point");
    assert_eq!(Rc::strong_count(&name), 2);
    symtab.unbind("point");
    assert_eq!(Rc::strong_count(&name), 1);
}

#[test]
fn bound_ids_include_shadowed_bindings() {
    let mut symtab = SymbolTable::new();
    symtab.bind(Rc::from("x"), TypeId::INT);
    symtab.bind(Rc::from("x"), TypeId::REAL);
    symtab.bind(Rc::from("y"), TypeId::BOOL);

    let mut ids: Vec<TypeId> = symtab.bound_ids().collect();
    ids.sort();
    assert_eq!(ids, vec![TypeId::BOOL, TypeId::INT, TypeId::REAL]);
}
