use super::*;
use crate::graph::SymbolGraph;

fn source_assembly(b: &mut GraphBuilder) -> AssemblyId {
    b.add_assembly("App", AssemblyOptions::source())
}

#[test]
fn test_property_accessors_link_back() {
    let mut b = GraphBuilder::new();
    let app = source_assembly(&mut b);
    let c = b.add_type(app, TypeDecl::class("C"));
    let p = b.add_property(
        c,
        PropertyDecl::new("P", TypeSig::I32)
            .flags(MemberFlags::VIRTUAL)
            .getter()
            .setter(),
    );
    let graph = b.finish().unwrap();

    let getter = graph.member(p.getter.unwrap());
    let setter = graph.member(p.setter.unwrap());
    assert_eq!(graph.names().resolve(getter.name), "get_P");
    assert_eq!(graph.names().resolve(setter.name), "set_P");
    assert_eq!(
        getter.accessor_of(),
        Some(AccessorOf {
            associated: p.property,
            role: AccessorRole::Get,
        })
    );
    // Setter takes the value and returns void.
    assert_eq!(setter.params().len(), 1);
    assert_eq!(setter.return_type(), Some(&SigType::void()));
    assert!(getter.is_metadata_virtual());
}

#[test]
fn test_event_accessors() {
    let mut b = GraphBuilder::new();
    let app = source_assembly(&mut b);
    let c = b.add_type(app, TypeDecl::class("C"));
    let e = b.add_event(c, EventDecl::new("Changed", TypeSig::OBJECT));
    let graph = b.finish().unwrap();

    let event = graph.member(e.event);
    assert_eq!(event.accessor(AccessorRole::Add), Some(e.adder));
    assert_eq!(event.accessor(AccessorRole::Remove), Some(e.remover));
    assert_eq!(
        graph.member(e.remover).as_method().map(|m| m.method_kind),
        Some(MethodKind::EventRemove)
    );
}

#[test]
fn test_metadata_virtual_follows_modifiers_unless_forced() {
    let mut b = GraphBuilder::new();
    let app = source_assembly(&mut b);
    let c = b.add_type(app, TypeDecl::class("C"));
    let plain = b.add_method(c, MethodDecl::new("A"));
    let virt = b.add_method(c, MethodDecl::new("B").flags(MemberFlags::ABSTRACT));
    let forced = b.add_method(c, MethodDecl::new("C").metadata_virtual(true));
    let graph = b.finish().unwrap();

    assert!(!graph.member(plain).is_metadata_virtual());
    assert!(graph.member(virt).is_metadata_virtual());
    assert!(graph.member(forced).is_metadata_virtual());
}

#[test]
fn test_interface_with_base_is_rejected() {
    let mut b = GraphBuilder::new();
    let app = source_assembly(&mut b);
    let c = b.add_type(app, TypeDecl::class("C"));
    b.add_type(app, TypeDecl::interface("I").base(c));
    assert_eq!(
        b.finish().err(),
        Some(GraphError::InterfaceWithBase { ty: "I".into() })
    );
}

#[test]
fn test_class_listing_class_as_interface_is_rejected() {
    let mut b = GraphBuilder::new();
    let app = source_assembly(&mut b);
    let c = b.add_type(app, TypeDecl::class("C"));
    b.add_type(app, TypeDecl::class("D").interfaces(&[c]));
    assert!(matches!(
        b.finish(),
        Err(GraphError::NotAnInterface { .. })
    ));
}

#[test]
fn test_base_cycle_is_rejected() {
    let mut b = GraphBuilder::new();
    let app = source_assembly(&mut b);
    // Forward reference to the type added next.
    let a = b.add_type(app, TypeDecl::class("A").base(TypeDefId(1)));
    b.add_type(app, TypeDecl::class("B").base(a));
    let err = b.finish().unwrap_err();
    assert!(matches!(err, GraphError::CyclicInheritance { .. }));
    assert!(err.to_string().contains("inheritance cycle"));
}

#[test]
fn test_unknown_type_is_reported_at_finish() {
    let mut b = GraphBuilder::new();
    b.add_method(TypeDefId(7), MethodDecl::new("M"));
    assert_eq!(b.finish().err(), Some(GraphError::UnknownType(TypeDefId(7))));
}

#[test]
fn test_construct_type_substitutes_members() {
    let mut b = GraphBuilder::new();
    let app = source_assembly(&mut b);
    let list = b.add_type(app, TypeDecl::class("List").arity(1));
    let add = b.add_method(list, MethodDecl::new("Add").param(TypeSig::TypeParam(0)));
    let item = b.add_property(
        list,
        PropertyDecl::indexer(TypeSig::TypeParam(0), vec![SigType::new(TypeSig::I32)]).getter(),
    );

    let list_int = b.construct_type(list, vec![TypeSig::I32]).unwrap();
    let again = b.construct_type(list, vec![TypeSig::I32]).unwrap();
    assert_eq!(list_int, again);

    let graph = b.finish().unwrap();
    let def = graph.type_def(list_int);
    assert_eq!(def.constructed_from, Some(list));
    assert!(!def.is_definition());
    assert_eq!(def.members.len(), 3);

    let add_int = graph.member_named(list_int, "Add").unwrap();
    let add_int = graph.member(add_int);
    assert_eq!(add_int.original_definition, Some(add));
    assert_eq!(add_int.params()[0].ty, TypeSig::I32);

    // Accessor links point at the constructed property, not the definition's.
    let item_int = graph.member_named(list_int, "Item").unwrap();
    let getter_int = graph.member(item_int).accessor(AccessorRole::Get).unwrap();
    assert_ne!(Some(getter_int), item.getter);
    assert_eq!(graph.member(getter_int).accessor_of().unwrap().associated, item_int);
    assert_eq!(graph.member(getter_int).return_type().unwrap().ty, TypeSig::I32);
}

#[test]
fn test_construct_type_substitutes_open_base() {
    let mut b = GraphBuilder::new();
    let app = source_assembly(&mut b);
    let base = b.add_type(app, TypeDecl::class("Base").arity(1));
    b.add_method(base, MethodDecl::new("M").param(TypeSig::TypeParam(0)));
    let base_open = b.construct_type(base, vec![TypeSig::TypeParam(0)]).unwrap();
    let derived = b.add_type(app, TypeDecl::class("Derived").arity(1).base(base_open));

    let derived_str = b.construct_type(derived, vec![TypeSig::STRING]).unwrap();
    let graph = b.finish().unwrap();

    let base_str = graph.base_type(derived_str).unwrap();
    assert_eq!(graph.type_def(base_str).type_args, vec![TypeSig::STRING]);
    let m = graph.member_named(base_str, "M").unwrap();
    assert_eq!(graph.member(m).params()[0].ty, TypeSig::STRING);
}

#[test]
fn test_construct_type_checks_arity() {
    let mut b = GraphBuilder::new();
    let app = source_assembly(&mut b);
    let plain = b.add_type(app, TypeDecl::class("Plain"));
    assert!(matches!(
        b.construct_type(plain, vec![TypeSig::I32]),
        Err(GraphError::ArityMismatch { expected: 0, found: 1, .. })
    ));
}

#[test]
fn test_instantiate_method() {
    let mut b = GraphBuilder::new();
    let app = source_assembly(&mut b);
    let c = b.add_type(app, TypeDecl::class("C"));
    let m = b.add_method(
        c,
        MethodDecl::new("M")
            .type_params(1)
            .param(TypeSig::MethodTypeParam(0)),
    );
    let m_int = b.instantiate_method(m, vec![TypeSig::I32]).unwrap();
    let graph = b.finish().unwrap();

    let inst = graph.member(m_int).as_method().unwrap();
    assert_eq!(inst.constructed_from, Some(m));
    assert_eq!(inst.params[0].ty, TypeSig::I32);
    // Instances are not listed by name.
    assert_eq!(graph.members_by_name(c, graph.member(m).name), &[m]);
}
