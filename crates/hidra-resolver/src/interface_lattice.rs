//! Resolution across the interfaces an interface extends.
//!
//! Interface members never override; they only hide. The transitive interface
//! set is visited once in topological order (every interface before the
//! interfaces it extends), so a match found on a path closer to the
//! containing interface can prune everything above it. If a member is hidden
//! along any path it is hidden along all paths.
//!
//! Override hints do not apply to interface members.

use crate::matcher::find_in_type;
use crate::result::OverriddenOrHiddenResult;
use hidra_symbols::{Member, MemberId, SymbolGraph, TypeDefId};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

pub fn resolve_interface_member(
    graph: &dyn SymbolGraph,
    member: &Member,
) -> OverriddenOrHiddenResult {
    let containing_type = member.containing_type;
    let kind = member.kind();

    // Interfaces whose members are all hidden already.
    let mut fully_hidden: FxHashSet<TypeDefId> = FxHashSet::default();
    // Interfaces whose members are hidden for this kind only: a closer
    // interface declared a same-named member that did not match.
    let mut other_kind_hidden: FxHashSet<TypeDefId> = FxHashSet::default();
    let mut hidden: SmallVec<[MemberId; 4]> = SmallVec::new();
    let mut seen: FxHashSet<MemberId> = FxHashSet::default();
    let mut push = |candidate: MemberId| {
        if graph.member(candidate).can_be_hidden_by(kind) && seen.insert(candidate) {
            hidden.push(candidate);
        }
    };

    for &iface in graph.all_interfaces(containing_type) {
        if fully_hidden.contains(&iface) {
            continue;
        }
        let scan = find_in_type(graph, member, containing_type, None, iface);

        // Cross-kind hiding in this interface is already covered by the
        // closer member that put it in `other_kind_hidden`.
        if !other_kind_hidden.contains(&iface) {
            scan.hidden.iter().copied().for_each(&mut push);
        }
        if let Some(best) = scan.best_match {
            push(best);
            fully_hidden.extend(graph.all_interfaces(iface).iter().copied());
        } else if scan.same_kind_nonmatch || !scan.hidden.is_empty() {
            other_kind_hidden.extend(graph.all_interfaces(iface).iter().copied());
        }
    }

    trace!(
        member = %member.id,
        hidden = hidden.len(),
        pruned = fully_hidden.len(),
        "resolve_interface_member"
    );
    OverriddenOrHiddenResult::new(Vec::new(), hidden.into_vec())
}

#[cfg(test)]
#[path = "../tests/interface_lattice_tests.rs"]
mod tests;
