//! Resolution along a class's base chain.

use crate::matcher::{find_in_type, push_hidden_if_applicable};
use crate::result::OverriddenOrHiddenResult;
use crate::signature::SignatureEquivalencePolicy;
use hidra_symbols::{Member, MemberId, MemberKind, SymbolGraph};
use smallvec::SmallVec;
use tracing::trace;

/// Walk the base chain of `member`'s containing type until some type yields
/// a match or a hidden member.
pub fn resolve_class_member(
    graph: &dyn SymbolGraph,
    member: &Member,
    hint: Option<MemberId>,
) -> OverriddenOrHiddenResult {
    let containing_type = member.containing_type;
    let mut best_match = None;
    let mut hidden = SmallVec::new();

    let mut current = graph.base_type(containing_type);
    while let Some(ty) = current {
        let scan = find_in_type(graph, member, containing_type, hint, ty);
        best_match = scan.best_match;
        hidden = scan.hidden;
        if best_match.is_some() || !hidden.is_empty() {
            break;
        }
        current = graph.base_type(ty);
    }

    trace!(member = %member.id, best_match = ?best_match, hidden = hidden.len(), "resolve_class_member");
    find_related_members(
        graph,
        member.is_override(),
        graph.is_from_source(member.id),
        member.kind(),
        best_match,
        hidden,
    )
}

/// Turn a representative match into the final result, adding members of the
/// representative's type that share its signature.
///
/// Siblings only exist when the representative's type is a generic
/// instantiation (substitution can collapse distinct signatures) or the
/// representative is an indexer.
pub(crate) fn find_related_members(
    graph: &dyn SymbolGraph,
    is_override: bool,
    from_source: bool,
    kind: MemberKind,
    representative: Option<MemberId>,
    mut hidden: SmallVec<[MemberId; 2]>,
) -> OverriddenOrHiddenResult {
    let Some(rep_id) = representative else {
        return OverriddenOrHiddenResult::new(Vec::new(), hidden.into_vec());
    };
    let rep = graph.member(rep_id);
    let need_to_search = !matches!(kind, MemberKind::Field | MemberKind::NamedType)
        && (!graph.type_def(rep.containing_type).is_definition() || rep.is_indexer());

    if is_override {
        let mut overridden = vec![rep_id];
        if need_to_search {
            let rep_count = rep.custom_modifier_count();
            for other in siblings(graph, rep) {
                let matches = if from_source {
                    SignatureEquivalencePolicy::LanguageOverrideMatch.equivalent(rep, other)
                        && other.custom_modifier_count() == rep_count
                } else {
                    SignatureEquivalencePolicy::ExactCustomModifierMatch.equivalent(rep, other)
                };
                if matches {
                    overridden.push(other.id);
                }
            }
        }
        OverriddenOrHiddenResult::new(overridden, hidden.into_vec())
    } else {
        push_hidden_if_applicable(graph, &mut hidden, kind, rep_id);
        if need_to_search {
            for other in siblings(graph, rep) {
                if SignatureEquivalencePolicy::LanguageOverrideMatch.equivalent(rep, other) {
                    push_hidden_if_applicable(graph, &mut hidden, kind, other.id);
                }
            }
        }
        OverriddenOrHiddenResult::new(Vec::new(), hidden.into_vec())
    }
}

/// Other same-named, same-kind members of `rep`'s type, in declaration order.
fn siblings<'g>(graph: &'g dyn SymbolGraph, rep: &'g Member) -> impl Iterator<Item = &'g Member> {
    graph
        .members_by_name(rep.containing_type, rep.name)
        .iter()
        .filter(move |&&id| id != rep.id)
        .map(move |&id| graph.member(id))
        .filter(move |other| other.kind() == rep.kind())
}

#[cfg(test)]
#[path = "../tests/class_chain_tests.rs"]
mod tests;
