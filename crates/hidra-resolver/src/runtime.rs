//! Runtime override analysis.
//!
//! The runtime resolves overrides by its own, looser signature rules: return
//! types take part, ref and out are indistinguishable, and only
//! metadata-virtual methods are visible. Where that resolution disagrees
//! with the language's, the override needs an explicit record in metadata.

use crate::result::{ExplicitOverrideRecord, RuntimeOverride};
use crate::signature::{SignatureEquivalencePolicy, identical_return_types};
use hidra_symbols::{Member, MemberId, MemberKind, SymbolGraph, TypeDefId, TypeKind};
use tracing::{debug, trace};

/// The first method up the base chain that the runtime considers overridden
/// by `method`.
///
/// Returns `None` for members of non-class types and when nothing in the
/// chain matches.
pub fn first_runtime_overridden_method(
    graph: &dyn SymbolGraph,
    method: &Member,
) -> Option<RuntimeOverride> {
    if method.kind() != MemberKind::Method || !is_class(graph, method.containing_type) {
        return None;
    }

    let mut current = graph.base_type(method.containing_type);
    while let Some(ty) = current {
        let mut candidates = graph
            .members_by_name(ty, method.name)
            .iter()
            .map(|&id| graph.member(id))
            .filter(|other| {
                other.kind() == MemberKind::Method
                    && other.is_metadata_virtual()
                    && graph.is_accessible(other.id, method.containing_type)
                    && SignatureEquivalencePolicy::RuntimeSignatureMatch.equivalent(method, other)
            });
        if let Some(first) = candidates.next() {
            let found = RuntimeOverride {
                method: first.id,
                was_ambiguous: candidates.next().is_some(),
            };
            trace!(method = %method.id, found = ?found, ty = %ty, "first_runtime_overridden_method");
            return Some(found);
        }
        current = graph.base_type(ty);
    }
    None
}

/// Decide whether `method`, which the language resolves to
/// `language_overridden` and the runtime to `runtime`, needs an explicit
/// override record.
pub fn explicit_override_record(
    graph: &dyn SymbolGraph,
    method: &Member,
    language_overridden: Option<MemberId>,
    runtime: Option<RuntimeOverride>,
    report_ambiguous: bool,
) -> ExplicitOverrideRecord {
    let mut record = decide(graph, method, language_overridden, runtime);
    if !report_ambiguous {
        record.should_warn_ambiguous = false;
    }
    debug!(
        method = %method.id,
        required = record.required,
        warn = record.should_warn_ambiguous,
        "explicit_override_record"
    );
    record
}

fn decide(
    graph: &dyn SymbolGraph,
    method: &Member,
    language_overridden: Option<MemberId>,
    runtime: Option<RuntimeOverride>,
) -> ExplicitOverrideRecord {
    if !method.is_override() || !is_class(graph, method.containing_type) {
        return ExplicitOverrideRecord::NOT_REQUIRED;
    }
    let Some(language_id) = language_overridden else {
        return ExplicitOverrideRecord::NOT_REQUIRED;
    };
    let ambiguous = runtime.is_some_and(|r| r.was_ambiguous);
    let runtime_id = runtime.map(|r| r.method);
    if runtime_id == Some(language_id) && !ambiguous {
        return ExplicitOverrideRecord::NOT_REQUIRED;
    }

    let assembly = graph.type_def(method.containing_type).assembly;
    if graph.supports_covariant_return_dispatch(assembly) {
        return ExplicitOverrideRecord::REQUIRED;
    }
    let language = graph.member(language_id);
    if !identical_return_types(method, language) {
        return ExplicitOverrideRecord::REQUIRED;
    }

    let Some(runtime_id) = runtime_id else {
        return ExplicitOverrideRecord::REQUIRED;
    };
    let runtime = graph.member(runtime_id);
    if !has_runtime_collision(graph, runtime) {
        return ExplicitOverrideRecord::REQUIRED;
    }

    if ambiguous {
        // The collision was already there in the declaration being
        // overridden; whoever declared it saw the warning.
        let original = graph.member(language.original_definition.unwrap_or(language_id));
        if has_runtime_collision(graph, original) {
            return ExplicitOverrideRecord::REQUIRED;
        }
        if language.containing_type != runtime.containing_type {
            return ExplicitOverrideRecord::REQUIRED;
        }
    }

    let required = language_id != runtime_id && (language.is_accessor() != runtime.is_accessor());
    ExplicitOverrideRecord {
        required,
        should_warn_ambiguous: required,
    }
}

/// Whether another method of `method`'s own type has the same runtime
/// signature.
fn has_runtime_collision(graph: &dyn SymbolGraph, method: &Member) -> bool {
    graph
        .members_by_name(method.containing_type, method.name)
        .iter()
        .filter(|&&id| id != method.id)
        .map(|&id| graph.member(id))
        .any(|other| SignatureEquivalencePolicy::RuntimeSignatureMatch.equivalent(method, other))
}

fn is_class(graph: &dyn SymbolGraph, ty: TypeDefId) -> bool {
    graph.type_def(ty).kind == TypeKind::Class
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
