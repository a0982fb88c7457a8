use super::*;
use hidra_symbols::{
    Accessibility, AccessorRole, AssemblyOptions, GraphBuilder, MemberFlags, MemberId, MethodDecl,
    PropertyDecl, SymbolGraph, TypeDecl, TypeSig,
};

#[test]
fn test_classify_member_kinds() {
    let mut b = GraphBuilder::new();
    let app = b.add_assembly("App", AssemblyOptions::source());
    let c = b.add_type(app, TypeDecl::class("C"));
    let nested = b.add_type(app, TypeDecl::class("Nested"));
    let ordinary = b.add_method(c, MethodDecl::new("M").flags(MemberFlags::VIRTUAL));
    let ctor = b.add_method(c, MethodDecl::new(".ctor").kind(MethodKind::Constructor));
    let op = b.add_method(
        c,
        MethodDecl::new("op_Addition")
            .kind(MethodKind::Operator)
            .flags(MemberFlags::STATIC),
    );
    let explicit = b.add_method(
        c,
        MethodDecl::new("I.M").kind(MethodKind::ExplicitInterfaceImplementation),
    );
    let field = b.add_field(c, "f", TypeSig::I32, Accessibility::Private, MemberFlags::empty());
    let nested_member = b.add_nested_type(c, nested, Accessibility::Public);
    let prop = b.add_property(c, PropertyDecl::new("P", TypeSig::I32).getter());
    let generic = b.add_method(c, MethodDecl::new("G").type_params(1));
    let instance = b.instantiate_method(generic, vec![TypeSig::I32]).unwrap();
    let graph = b.finish().unwrap();

    let class_of = |id: MemberId| classify(graph.member(id));
    assert_eq!(class_of(ordinary), Classification::Eligible);
    assert_eq!(class_of(generic), Classification::Eligible);
    assert_eq!(class_of(ctor), Classification::NotEligible);
    assert_eq!(class_of(op), Classification::NotEligible);
    assert_eq!(class_of(explicit), Classification::NotEligible);
    assert_eq!(class_of(instance), Classification::NotEligible);
    assert_eq!(class_of(field), Classification::NameOnly);
    assert_eq!(class_of(nested_member), Classification::NameOnly);
    assert_eq!(class_of(prop.property), Classification::Eligible);
    assert_eq!(
        class_of(prop.getter.unwrap()),
        Classification::Accessor(AccessorOf {
            associated: prop.property,
            role: AccessorRole::Get,
        })
    );
    assert!(!Classification::NotEligible.is_eligible());
}

#[test]
#[should_panic(expected = "unsupported accessor")]
fn test_orphan_accessor_panics() {
    let mut b = GraphBuilder::new();
    let app = b.add_assembly("App", AssemblyOptions::source());
    let c = b.add_type(app, TypeDecl::class("C"));
    let orphan = b.add_method(c, MethodDecl::new("get_X").kind(MethodKind::PropertyGet));
    let graph = b.finish().unwrap();
    classify(graph.member(orphan));
}
