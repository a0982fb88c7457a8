use super::*;
use crate::class_chain::resolve_class_member;
use hidra_symbols::{FixtureGraph, MemberGraph};

fn load(source: &str) -> FixtureGraph {
    MemberGraph::from_fixture_str(source).unwrap()
}

fn overridden_of(graph: &dyn SymbolGraph, id: MemberId) -> Option<MemberId> {
    resolve_class_member(graph, graph.member(id), None).overridden_member()
}

fn resolve(f: &FixtureGraph, key: &str) -> OverriddenOrHiddenResult {
    let graph: &dyn SymbolGraph = &f.graph;
    let accessor = graph.member(f.member(key).unwrap());
    let link = accessor.accessor_of().unwrap();
    let owner = resolve_class_member(graph, graph.member(link.associated), None);
    resolve_accessor(graph, accessor, link, &owner, &|id| overridden_of(graph, id))
}

fn ids(f: &FixtureGraph, keys: &[&str]) -> Vec<MemberId> {
    keys.iter().map(|k| f.member(k).unwrap()).collect()
}

#[test]
fn test_get_only_override_overrides_getter() {
    let f = load(
        r#"{ "types": [
            { "name": "Base", "members": [
                { "kind": "property", "name": "P", "type": "int32", "get": true, "set": true,
                  "modifiers": ["virtual"] } ] },
            { "name": "Derived", "base": "Base", "members": [
                { "kind": "property", "name": "P", "type": "int32", "get": true,
                  "modifiers": ["override"] } ] } ] }"#,
    );
    assert!(f.member("Derived.P.set").is_err());
    let result = resolve(&f, "Derived.P.get");
    assert_eq!(result, OverriddenOrHiddenResult::new(ids(&f, &["Base.P.get"]), vec![]));
}

#[test]
fn test_hidden_property_projects_to_same_role() {
    let f = load(
        r#"{ "types": [
            { "name": "Base", "members": [
                { "kind": "property", "name": "P", "type": "int32", "get": true, "set": true } ] },
            { "name": "Derived", "base": "Base", "members": [
                { "kind": "property", "name": "P", "type": "string", "get": true, "set": true,
                  "modifiers": ["new"] } ] } ] }"#,
    );
    assert_eq!(resolve(&f, "Derived.P.set").hidden_members, ids(&f, &["Base.P.set"]));
    assert_eq!(resolve(&f, "Derived.P.get").hidden_members, ids(&f, &["Base.P.get"]));
}

#[test]
fn test_hidden_field_has_no_accessor_to_project() {
    let f = load(
        r#"{ "types": [
            { "name": "Base", "members": [ { "kind": "field", "name": "P", "type": "int32" } ] },
            { "name": "Derived", "base": "Base", "members": [
                { "kind": "property", "name": "P", "type": "int32", "get": true } ] } ] }"#,
    );
    assert!(resolve(&f, "Derived.P.get").is_empty());
}

#[test]
fn test_inaccessible_base_accessor_is_not_overridden() {
    let f = load(
        r#"{ "types": [
            { "name": "Base", "members": [
                { "kind": "property", "name": "P", "type": "int32", "get": true,
                  "setAccessibility": "private", "modifiers": ["virtual"] } ] },
            { "name": "Derived", "base": "Base", "members": [
                { "kind": "property", "name": "P", "type": "int32", "get": true, "set": true,
                  "modifiers": ["override"] } ] } ] }"#,
    );
    assert_eq!(resolve(&f, "Derived.P.get").overridden_members, ids(&f, &["Base.P.get"]));
    assert!(resolve(&f, "Derived.P.set").is_empty());
}

#[test]
fn test_missing_accessor_is_inherited_through_override_chain() {
    let f = load(
        r#"{ "types": [
            { "name": "A", "members": [
                { "kind": "property", "name": "P", "type": "int32", "get": true, "set": true,
                  "modifiers": ["virtual"] } ] },
            { "name": "B", "base": "A", "members": [
                { "kind": "property", "name": "P", "type": "int32", "get": true,
                  "modifiers": ["override"] } ] },
            { "name": "C", "base": "B", "members": [
                { "kind": "property", "name": "P", "type": "int32", "set": true,
                  "modifiers": ["override"] } ] } ] }"#,
    );
    assert_eq!(resolve(&f, "C.P.set").overridden_members, ids(&f, &["A.P.set"]));

    let graph: &dyn SymbolGraph = &f.graph;
    let b_p = f.member("B.P").unwrap();
    let lookup = |id| overridden_of(graph, id);
    assert_eq!(
        own_or_inherited_accessor(graph, b_p, AccessorRole::Get, &lookup),
        Some(f.member("B.P.get").unwrap())
    );
    assert_eq!(
        own_or_inherited_accessor(graph, b_p, AccessorRole::Set, &lookup),
        Some(f.member("A.P.set").unwrap())
    );
}

#[test]
fn test_event_accessors_follow_event() {
    let f = load(
        r#"{ "types": [
            { "name": "Handler", "kind": "delegate" },
            { "name": "Base", "members": [
                { "kind": "event", "name": "E", "type": "Handler", "modifiers": ["virtual"] } ] },
            { "name": "Derived", "base": "Base", "members": [
                { "kind": "event", "name": "E", "type": "Handler", "modifiers": ["override"] } ] } ] }"#,
    );
    assert_eq!(resolve(&f, "Derived.E.add").overridden_members, ids(&f, &["Base.E.add"]));
    assert_eq!(resolve(&f, "Derived.E.remove").overridden_members, ids(&f, &["Base.E.remove"]));
}
