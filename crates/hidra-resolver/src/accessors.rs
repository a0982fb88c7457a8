//! Accessor resolution.
//!
//! Accessors never walk a chain of their own. They take the result already
//! computed for their property or event and project it onto the accessor of
//! the same role.

use crate::class_chain::find_related_members;
use crate::result::OverriddenOrHiddenResult;
use crate::signature::SignatureEquivalencePolicy;
use hidra_symbols::{AccessorOf, AccessorRole, Member, MemberId, MemberKind, SymbolGraph};
use smallvec::SmallVec;
use tracing::trace;

/// Resolve `accessor` from `owner_result`, the result for the property or
/// event named by `link`.
///
/// `overridden_of` yields the member a property or event overrides; it is
/// followed when an overridden property lacks the accessor being resolved.
pub fn resolve_accessor(
    graph: &dyn SymbolGraph,
    accessor: &Member,
    link: AccessorOf,
    owner_result: &OverriddenOrHiddenResult,
    overridden_of: &dyn Fn(MemberId) -> Option<MemberId>,
) -> OverriddenOrHiddenResult {
    let hidden: SmallVec<[MemberId; 2]> = owner_result
        .hidden_members
        .iter()
        .filter_map(|&h| graph.member(h).accessor(link.role))
        .collect();

    let from_source = graph.is_from_source(accessor.id);
    let overridden = owner_result.overridden_member().and_then(|owner| {
        let candidate = own_or_inherited_accessor(graph, owner, link.role, overridden_of)?;
        let accepted = graph.is_accessible(candidate, accessor.containing_type)
            && SignatureEquivalencePolicy::accessor(from_source)
                .equivalent(accessor, graph.member(candidate));
        accepted.then_some(candidate)
    });

    trace!(
        accessor = %accessor.id,
        role = ?link.role,
        overridden = ?overridden,
        hidden = hidden.len(),
        "resolve_accessor"
    );
    find_related_members(
        graph,
        accessor.is_override(),
        from_source,
        MemberKind::Method,
        overridden,
        hidden,
    )
}

/// The accessor of `role` declared by `owner`, or by the nearest property or
/// event `owner` overrides that declares one.
pub fn own_or_inherited_accessor(
    graph: &dyn SymbolGraph,
    owner: MemberId,
    role: AccessorRole,
    overridden_of: &dyn Fn(MemberId) -> Option<MemberId>,
) -> Option<MemberId> {
    let mut current = Some(owner);
    while let Some(id) = current {
        let member = graph.member(id);
        if let Some(found) = member.accessor(role) {
            return Some(found);
        }
        current = if member.is_override() {
            overridden_of(id)
        } else {
            None
        };
    }
    None
}

#[cfg(test)]
#[path = "../tests/accessors_tests.rs"]
mod tests;
