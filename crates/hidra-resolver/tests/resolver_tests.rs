use super::*;
use hidra_symbols::{FixtureGraph, MemberGraph};

fn load(source: &str) -> FixtureGraph {
    MemberGraph::from_fixture_str(source).unwrap()
}

fn ids(f: &FixtureGraph, keys: &[&str]) -> Vec<MemberId> {
    keys.iter().map(|k| f.member(k).unwrap()).collect()
}

const SHAPES: &str = r#"{ "types": [
    { "name": "Shape", "members": [
        { "kind": "method", "name": "Area", "returns": "float64", "modifiers": ["virtual"] },
        { "kind": "method", "name": ".ctor", "methodKind": "constructor" },
        { "kind": "property", "name": "Name", "type": "string", "get": true, "set": true,
          "modifiers": ["virtual"] },
        { "kind": "field", "name": "Id", "type": "int32" } ] },
    { "name": "Circle", "base": "Shape", "members": [
        { "kind": "method", "name": "Area", "returns": "float64", "modifiers": ["override"] },
        { "kind": "method", "name": ".ctor", "methodKind": "constructor" },
        { "kind": "property", "name": "Name", "type": "string", "get": true, "modifiers": ["override"] },
        { "kind": "field", "name": "Id", "type": "int64", "modifiers": ["new"] } ] } ] }"#;

#[test]
fn test_dispatches_by_classification() {
    let f = load(SHAPES);
    let resolver = OverrideResolver::new(&f.graph);

    assert_eq!(
        resolver.resolve(f.member("Circle.Area").unwrap()).overridden_members,
        ids(&f, &["Shape.Area"])
    );
    assert!(resolver.resolve(f.member("Circle..ctor").unwrap()).is_empty());
    assert_eq!(
        resolver.resolve(f.member("Circle.Name.get").unwrap()).overridden_members,
        ids(&f, &["Shape.Name.get"])
    );
    assert_eq!(
        resolver.first_hidden_member_if_any(f.member("Circle.Id").unwrap()),
        f.member("Shape.Id").ok()
    );
    assert_eq!(resolver.first_hidden_member_if_any(f.member("Circle.Area").unwrap()), None);
}

#[test]
fn test_results_are_cached() {
    let f = load(SHAPES);
    let resolver = OverrideResolver::new(&f.graph);
    let area = f.member("Circle.Area").unwrap();

    let first = resolver.resolve(area);
    let second = resolver.resolve(area);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(resolver.cache_stats(), CacheStats { hits: 1, misses: 1 });
    assert_eq!(resolver.cached_len(), 1);
}

#[test]
fn test_accessor_resolution_reuses_owner_result() {
    let f = load(SHAPES);
    let resolver = OverrideResolver::new(&f.graph);
    resolver.resolve(f.member("Circle.Name").unwrap());
    resolver.resolve(f.member("Circle.Name.get").unwrap());
    assert_eq!(resolver.cache_stats(), CacheStats { hits: 1, misses: 2 });
}

#[test]
fn test_memoization_can_be_disabled() {
    let f = load(SHAPES);
    let options = ResolverOptions {
        memoize: false,
        ..ResolverOptions::default()
    };
    let resolver = OverrideResolver::with_options(&f.graph, options);
    let area = f.member("Circle.Area").unwrap();
    assert_eq!(resolver.resolve(area), resolver.resolve(area));
    assert_eq!(resolver.cache_stats(), CacheStats::default());
    assert_eq!(resolver.cached_len(), 0);
}

#[test]
fn test_property_borrows_getter_hint() {
    let f = load(
        r#"{ "types": [
            { "name": "Animal", "members": [
                { "kind": "property", "name": "Self", "type": "Animal", "get": true,
                  "modifiers": ["virtual"] } ] },
            { "name": "Cat", "base": "Animal", "members": [
                { "kind": "property", "name": "Self", "type": "Cat", "get": true,
                  "modifiers": ["override"] } ] } ],
        "hints": [ { "method": "Cat.Self.get", "target": "Animal.Self.get" } ] }"#,
    );
    let resolver = OverrideResolver::new(&f.graph);
    assert_eq!(
        resolver.overridden_member(f.member("Cat.Self").unwrap()),
        f.member("Animal.Self").ok()
    );
    assert_eq!(
        resolver.overridden_member(f.member("Cat.Self.get").unwrap()),
        f.member("Animal.Self.get").ok()
    );
}

#[test]
fn test_explicit_override_record_ignores_non_overrides() {
    let f = load(SHAPES);
    let resolver = OverrideResolver::new(&f.graph);
    let record = resolver.requires_explicit_override_record(f.member("Shape.Area").unwrap());
    assert_eq!(record, ExplicitOverrideRecord::NOT_REQUIRED);
    let record = resolver.requires_explicit_override_record(f.member("Circle.Area").unwrap());
    assert_eq!(record, ExplicitOverrideRecord::NOT_REQUIRED);
    assert_eq!(
        resolver.runtime_overridden_method(f.member("Circle.Area").unwrap()),
        Some(RuntimeOverride {
            method: f.member("Shape.Area").unwrap(),
            was_ambiguous: false,
        })
    );
}
