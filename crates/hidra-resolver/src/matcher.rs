//! Candidate matching within a single type.
//!
//! Both walkers call [`find_in_type`] once per type they visit. It looks at
//! the same-named members of that type and reports the best override/hide
//! match, any members of other kinds that are hidden by name, and whether a
//! same-kind member failed to match.

use crate::signature::SignatureEquivalencePolicy;
use hidra_symbols::{Member, MemberId, MemberKind, SymbolGraph, TypeDefId};
use smallvec::SmallVec;
use tracing::trace;

/// What [`find_in_type`] found in one candidate type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeScan {
    pub best_match: Option<MemberId>,
    /// A same-kind, same-name member that did not match.
    pub same_kind_nonmatch: bool,
    /// Members of a different kind hidden by name.
    pub hidden: SmallVec<[MemberId; 2]>,
}

impl TypeScan {
    /// Whether the walk up the class chain should stop here.
    pub fn is_conclusive(&self) -> bool {
        self.best_match.is_some() || !self.hidden.is_empty()
    }
}

/// Whether `other` can interact with a member declared in `containing_type`
/// at all. Inaccessible members are invisible, and accessors only interact
/// through their property or event (indexed-property accessors excepted).
pub(crate) fn is_candidate(
    graph: &dyn SymbolGraph,
    other: &Member,
    containing_type: TypeDefId,
) -> bool {
    if !graph.is_accessible(other.id, containing_type) {
        return false;
    }
    match other.accessor_of() {
        None => true,
        Some(link) => graph
            .member(link.associated)
            .as_property()
            .is_some_and(|p| p.is_indexed_property),
    }
}

/// Record `hidden` in `out` if a member of `hiding_kind` can hide it.
pub(crate) fn push_hidden_if_applicable(
    graph: &dyn SymbolGraph,
    out: &mut SmallVec<[MemberId; 2]>,
    hiding_kind: MemberKind,
    hidden: MemberId,
) {
    if graph.member(hidden).can_be_hidden_by(hiding_kind) {
        out.push(hidden);
    }
}

/// Scan the members of `candidate_type` named like `member`.
///
/// `hint` is a covariant-return override target recorded when `member` was
/// declared. When present it is the only possible signature match.
pub fn find_in_type(
    graph: &dyn SymbolGraph,
    member: &Member,
    containing_type: TypeDefId,
    hint: Option<MemberId>,
    candidate_type: TypeDefId,
) -> TypeScan {
    let from_source = graph.is_from_source(member.id);
    let exact_policy = SignatureEquivalencePolicy::exact(from_source);
    let fallback_policy = SignatureEquivalencePolicy::fallback(from_source);
    let kind = member.kind();
    let arity = member.arity();

    let mut scan = TypeScan::default();
    let mut has_exact_match = false;
    let mut exact_by_signature = false;
    let mut min_modifier_count = usize::MAX;

    let candidates = graph.members_by_name(candidate_type, member.name);
    for &other_id in candidates {
        let other = graph.member(other_id);
        if !is_candidate(graph, other, containing_type) {
            continue;
        }

        if other.kind() != kind {
            // Hiding across kinds needs equal arity, except that methods also
            // hide non-generic members.
            let other_arity = other.arity();
            if other_arity == arity || (kind == MemberKind::Method && other_arity == 0) {
                push_hidden_if_applicable(graph, &mut scan.hidden, kind, other_id);
            }
            continue;
        }
        if has_exact_match {
            continue;
        }

        match kind {
            MemberKind::Field => {
                has_exact_match = true;
                scan.best_match = Some(other_id);
            }
            MemberKind::NamedType => {
                if other.arity() == arity {
                    has_exact_match = true;
                    scan.best_match = Some(other_id);
                }
            }
            MemberKind::Method | MemberKind::Property | MemberKind::Event => {
                if hint == Some(other_id) {
                    has_exact_match = true;
                    scan.best_match = Some(other_id);
                } else if hint.is_some() {
                    scan.same_kind_nonmatch = true;
                } else if exact_policy.equivalent(member, other) {
                    has_exact_match = true;
                    exact_by_signature = true;
                    scan.best_match = Some(other_id);
                } else if fallback_policy.equivalent(member, other) {
                    // Fewest custom modifiers wins; ties keep the earliest.
                    let count = other.custom_modifier_count();
                    if count < min_modifier_count {
                        min_modifier_count = count;
                        scan.best_match = Some(other_id);
                    }
                } else {
                    scan.same_kind_nonmatch = true;
                }
            }
        }
    }

    if from_source && exact_by_signature {
        if let Some(best) = scan.best_match {
            scan.best_match = Some(prefer_fewer_return_modifiers(
                graph,
                member,
                containing_type,
                candidates,
                best,
            ));
        }
    }

    trace!(
        member = %member.id,
        candidate_type = %candidate_type,
        best_match = ?scan.best_match,
        same_kind_nonmatch = scan.same_kind_nonmatch,
        hidden = scan.hidden.len(),
        "find_in_type"
    );
    scan
}

/// An exact match ignores return types. If the winner's return type carries
/// different custom modifiers than `member`'s, a language-equivalent
/// candidate with fewer modifiers overall is preferred.
fn prefer_fewer_return_modifiers(
    graph: &dyn SymbolGraph,
    member: &Member,
    containing_type: TypeDefId,
    candidates: &[MemberId],
    best: MemberId,
) -> MemberId {
    let best_member = graph.member(best);
    let return_modifiers_differ = match (member.return_type(), best_member.return_type()) {
        (Some(ours), Some(theirs)) => !ours.same_modifiers(theirs),
        _ => false,
    };
    if !return_modifiers_differ {
        return best;
    }

    let mut winner = best;
    let mut min_count = best_member.custom_modifier_count();
    for &other_id in candidates {
        if other_id == best {
            continue;
        }
        let other = graph.member(other_id);
        if other.kind() != member.kind() || !is_candidate(graph, other, containing_type) {
            continue;
        }
        if SignatureEquivalencePolicy::LanguageOverrideMatch.equivalent(member, other) {
            let count = other.custom_modifier_count();
            if count < min_count {
                min_count = count;
                winner = other_id;
            }
        }
    }
    winner
}

#[cfg(test)]
#[path = "../tests/matcher_tests.rs"]
mod tests;
