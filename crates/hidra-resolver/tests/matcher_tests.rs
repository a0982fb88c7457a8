use super::*;
use hidra_symbols::{FixtureGraph, MemberGraph};

fn load(source: &str) -> FixtureGraph {
    MemberGraph::from_fixture_str(source).unwrap()
}

/// Scan the base type of `member`'s containing type.
fn scan_base(f: &FixtureGraph, member: &str, hint: Option<&str>) -> TypeScan {
    let graph: &dyn SymbolGraph = &f.graph;
    let member = graph.member(f.member(member).unwrap());
    let base = graph.base_type(member.containing_type).unwrap();
    let hint = hint.map(|h| f.member(h).unwrap());
    find_in_type(graph, member, member.containing_type, hint, base)
}

#[test]
fn test_field_matches_by_name() {
    let f = load(
        r#"{ "types": [
            { "name": "Base", "members": [ { "kind": "field", "name": "X", "type": "int32" } ] },
            { "name": "Derived", "base": "Base", "members": [
                { "kind": "field", "name": "X", "type": "string" } ] } ] }"#,
    );
    let scan = scan_base(&f, "Derived.X", None);
    assert_eq!(scan.best_match, Some(f.member("Base.X").unwrap()));
    assert!(scan.is_conclusive());
}

#[test]
fn test_nested_type_matches_by_arity() {
    let f = load(
        r#"{ "types": [
            { "name": "N", "key": "N`0" },
            { "name": "N", "key": "N`1", "arity": 1 },
            { "name": "N", "key": "N`1b", "arity": 1 },
            { "name": "Base", "members": [ { "kind": "type", "name": "N", "type": "N`1" } ] },
            { "name": "Plain", "base": "Base", "members": [
                { "kind": "type", "name": "N", "type": "N`0" } ] },
            { "name": "Generic", "base": "Base", "members": [
                { "kind": "type", "name": "N", "type": "N`1b" } ] } ] }"#,
    );
    assert_eq!(scan_base(&f, "Plain.N", None), TypeScan::default());
    assert_eq!(
        scan_base(&f, "Generic.N", None).best_match,
        Some(f.member("Base.N").unwrap())
    );
}

#[test]
fn test_different_kind_hidden_when_arity_agrees() {
    let f = load(
        r#"{ "types": [
            { "name": "Base", "members": [
                { "kind": "field", "name": "X", "type": "int32" },
                { "kind": "property", "name": "G", "type": "int32", "get": true },
                { "kind": "method", "name": "Q", "typeParams": 1 } ] },
            { "name": "Derived", "base": "Base", "members": [
                { "kind": "method", "name": "X" },
                { "kind": "method", "name": "G", "typeParams": 1 },
                { "kind": "property", "name": "Q", "type": "int32", "get": true } ] } ] }"#,
    );
    let x = scan_base(&f, "Derived.X", None);
    assert_eq!(x.best_match, None);
    assert_eq!(x.hidden.as_slice(), &[f.member("Base.X").unwrap()]);

    // A generic method hides a non-generic property.
    let g = scan_base(&f, "Derived.G", None);
    assert_eq!(g.hidden.as_slice(), &[f.member("Base.G").unwrap()]);

    // A property does not hide a generic method.
    let q = scan_base(&f, "Derived.Q", None);
    assert!(q.hidden.is_empty());
    assert!(!q.is_conclusive());
}

#[test]
fn test_inaccessible_candidates_are_skipped() {
    let f = load(
        r#"{ "types": [
            { "name": "Base", "members": [
                { "kind": "method", "name": "M", "modifiers": ["virtual"], "accessibility": "private" },
                { "kind": "field", "name": "F", "type": "int32", "accessibility": "private" } ] },
            { "name": "Derived", "base": "Base", "members": [
                { "kind": "method", "name": "M", "modifiers": ["override"] },
                { "kind": "method", "name": "F" } ] } ] }"#,
    );
    assert_eq!(scan_base(&f, "Derived.M", None), TypeScan::default());
    assert_eq!(scan_base(&f, "Derived.F", None), TypeScan::default());
}

#[test]
fn test_accessors_do_not_interact_directly() {
    let f = load(
        r#"{ "types": [
            { "name": "Base", "members": [
                { "kind": "property", "name": "P", "type": "int32", "get": true } ] },
            { "name": "Derived", "base": "Base", "members": [
                { "kind": "method", "name": "get_P", "returns": "int32" } ] } ] }"#,
    );
    assert_eq!(scan_base(&f, "Derived.get_P", None), TypeScan::default());
}

#[test]
fn test_indexed_property_accessors_can_be_matched() {
    let f = load(
        r#"{ "assemblies": [ { "name": "Lib", "source": false }, { "name": "App" } ],
          "types": [
            { "name": "Base", "assembly": "Lib", "members": [
                { "kind": "property", "name": "Cells", "type": "int32", "params": ["int32"],
                  "indexedProperty": true, "get": true, "modifiers": ["virtual"] } ] },
            { "name": "Derived", "assembly": "App", "base": "Base", "members": [
                { "kind": "method", "name": "get_Cells", "params": ["int32"], "returns": "int32",
                  "modifiers": ["override"] } ] } ] }"#,
    );
    let scan = scan_base(&f, "Derived.get_Cells", None);
    assert_eq!(scan.best_match, Some(f.member("Base.Cells.get").unwrap()));
}

#[test]
fn test_fewest_custom_modifiers_wins_inexact_match() {
    let f = load(
        r#"{ "types": [
            { "name": "IsConst" },
            { "name": "Base", "members": [
                { "kind": "method", "name": "M", "key": "two", "modifiers": ["virtual"],
                  "params": [ { "type": "int32", "modopt": ["IsConst", "IsConst"] } ] },
                { "kind": "method", "name": "M", "key": "one", "modifiers": ["virtual"],
                  "params": [ { "type": "int32", "modopt": ["IsConst"] } ] },
                { "kind": "method", "name": "M", "key": "one-again", "modifiers": ["virtual"],
                  "params": [ { "type": "int32", "modreq": ["IsConst"] } ] } ] },
            { "name": "Derived", "base": "Base", "members": [
                { "kind": "method", "name": "M", "params": ["int32"], "modifiers": ["override"] } ] } ] }"#,
    );
    let scan = scan_base(&f, "Derived.M", None);
    assert_eq!(scan.best_match, Some(f.member("one").unwrap()));
    assert!(!scan.same_kind_nonmatch);
}

#[test]
fn test_exact_match_beats_fewer_modifiers() {
    let f = load(
        r#"{ "types": [
            { "name": "IsConst" },
            { "name": "Base", "members": [
                { "kind": "method", "name": "M", "key": "plain", "modifiers": ["virtual"],
                  "params": ["int32"] },
                { "kind": "method", "name": "M", "key": "modded", "modifiers": ["virtual"],
                  "params": [ { "type": "int32", "modopt": ["IsConst"] } ] } ] },
            { "name": "Derived", "base": "Base", "members": [
                { "kind": "method", "name": "M", "modifiers": ["override"],
                  "params": [ { "type": "int32", "modopt": ["IsConst"] } ] } ] } ] }"#,
    );
    let scan = scan_base(&f, "Derived.M", None);
    assert_eq!(scan.best_match, Some(f.member("modded").unwrap()));
}

#[test]
fn test_return_modifier_fixup_prefers_fewer_modifiers() {
    let f = load(
        r#"{ "types": [
            { "name": "IsConst" },
            { "name": "Base", "members": [
                { "kind": "method", "name": "M", "key": "ret-modded", "modifiers": ["virtual"],
                  "params": ["int32"], "returns": { "type": "int32", "modopt": ["IsConst"] } },
                { "kind": "method", "name": "M", "key": "clean", "modifiers": ["virtual"],
                  "params": ["int32"], "returns": "int32" } ] },
            { "name": "Derived", "base": "Base", "members": [
                { "kind": "method", "name": "M", "modifiers": ["override"],
                  "params": ["int32"], "returns": "int32" } ] } ] }"#,
    );
    let scan = scan_base(&f, "Derived.M", None);
    assert_eq!(scan.best_match, Some(f.member("clean").unwrap()));
}

#[test]
fn test_hint_is_the_only_signature_match() {
    let f = load(
        r#"{ "types": [
            { "name": "Base", "members": [
                { "kind": "method", "name": "M", "key": "exact", "modifiers": ["virtual"], "returns": "object" },
                { "kind": "method", "name": "M", "key": "hinted", "modifiers": ["virtual"],
                  "params": ["int32"], "returns": "object" } ] },
            { "name": "Derived", "base": "Base", "members": [
                { "kind": "method", "name": "M", "modifiers": ["override"], "returns": "string" } ] } ] }"#,
    );
    let scan = scan_base(&f, "Derived.M", Some("hinted"));
    assert_eq!(scan.best_match, Some(f.member("hinted").unwrap()));
    assert!(scan.same_kind_nonmatch);

    let unhinted = scan_base(&f, "Derived.M", None);
    assert_eq!(unhinted.best_match, Some(f.member("exact").unwrap()));
}

#[test]
fn test_metadata_members_use_runtime_relation() {
    let f = load(
        r#"{ "assemblies": [ { "name": "Lib", "source": false } ],
          "types": [
            { "name": "Base", "members": [
                { "kind": "method", "name": "M", "modifiers": ["virtual"], "returns": "object" } ] },
            { "name": "Derived", "base": "Base", "members": [
                { "kind": "method", "name": "M", "modifiers": ["override"], "returns": "string" } ] } ] }"#,
    );
    let scan = scan_base(&f, "Derived.M", None);
    assert_eq!(scan.best_match, None);
    assert!(scan.same_kind_nonmatch);
}
