//! In-memory member graph.
//!
//! `MemberGraph` is the concrete `SymbolGraph` used by tests, fixtures and
//! embedders that already hold their symbols in memory. It is immutable once
//! built (see [`crate::GraphBuilder`]); name tables and topologically sorted
//! interface sets are precomputed by the builder.

use crate::graph::SymbolGraph;
use crate::ids::{AssemblyId, MemberId, TypeDefId};
use crate::member::{Accessibility, Member};
use crate::type_def::{AssemblyInfo, TypeDef};
use hidra_common::{Atom, Interner};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

pub(crate) type NameTable = FxHashMap<(TypeDefId, Atom), SmallVec<[MemberId; 2]>>;

pub struct MemberGraph {
    pub(crate) interner: Interner,
    pub(crate) assemblies: Vec<AssemblyInfo>,
    pub(crate) types: Vec<TypeDef>,
    pub(crate) members: Vec<Member>,
    pub(crate) by_name: NameTable,
    pub(crate) all_interfaces: Vec<Vec<TypeDefId>>,
    pub(crate) override_hints: FxHashMap<MemberId, MemberId>,
}

impl std::fmt::Debug for MemberGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberGraph")
            .field("assemblies", &self.assemblies.len())
            .field("types", &self.types.len())
            .field("members", &self.members.len())
            .finish_non_exhaustive()
    }
}

impl MemberGraph {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// All types, definitions and constructed instantiations alike.
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.iter()
    }

    /// First generic definition (or non-generic type) named `name`.
    pub fn type_named(&self, name: &str) -> Option<TypeDefId> {
        let atom = self.interner.lookup(name)?;
        self.types
            .iter()
            .find(|t| t.name == atom && t.is_definition())
            .map(|t| t.id)
    }

    /// First member of `ty` named `name`, in declaration order.
    pub fn member_named(&self, ty: TypeDefId, name: &str) -> Option<MemberId> {
        let atom = self.interner.lookup(name)?;
        self.members_by_name(ty, atom).first().copied()
    }

    /// Whether `ty` is `target`, or derives from or implements it.
    ///
    /// Constructed types are compared by their generic definition.
    pub fn derives_from(&self, ty: TypeDefId, target: TypeDefId) -> bool {
        let target_def = self.types[target.index()].original_definition();
        let mut current = Some(ty);
        while let Some(t) = current {
            let def = &self.types[t.index()];
            if def.original_definition() == target_def {
                return true;
            }
            current = def.base;
        }
        self.all_interfaces[ty.index()]
            .iter()
            .any(|&i| self.types[i.index()].original_definition() == target_def)
    }
}

impl SymbolGraph for MemberGraph {
    fn member(&self, id: MemberId) -> &Member {
        &self.members[id.index()]
    }

    fn type_def(&self, id: TypeDefId) -> &TypeDef {
        &self.types[id.index()]
    }

    fn assembly(&self, id: AssemblyId) -> &AssemblyInfo {
        &self.assemblies[id.index()]
    }

    fn members_by_name(&self, ty: TypeDefId, name: Atom) -> &[MemberId] {
        self.by_name.get(&(ty, name)).map_or(&[], |ids| ids.as_slice())
    }

    fn all_interfaces(&self, ty: TypeDefId) -> &[TypeDefId] {
        &self.all_interfaces[ty.index()]
    }

    fn is_accessible(&self, member: MemberId, from_type: TypeDefId) -> bool {
        let member = &self.members[member.index()];
        let owner = &self.types[member.containing_type.index()];
        let from = &self.types[from_type.index()];
        let same_assembly = owner.assembly == from.assembly;
        let derived = || self.derives_from(from_type, owner.id);
        match member.accessibility {
            Accessibility::Public => true,
            Accessibility::Internal => same_assembly,
            Accessibility::Protected => derived(),
            Accessibility::ProtectedOrInternal => same_assembly || derived(),
            Accessibility::ProtectedAndInternal => same_assembly && derived(),
            Accessibility::Private => from.original_definition() == owner.original_definition(),
        }
    }

    fn known_override_hint(&self, method: MemberId) -> Option<MemberId> {
        self.override_hints.get(&method).copied()
    }

    fn names(&self) -> &Interner {
        &self.interner
    }
}

/// Interfaces implemented by `ty`, each listed before the interfaces it
/// extends.
///
/// Post-order walk over the reversed declaration lists, then reversed, so
/// that unrelated siblings stay in declaration order. Interfaces of base
/// classes are included too.
pub(crate) fn topologically_sorted_interfaces(types: &[TypeDef], ty: TypeDefId) -> Vec<TypeDefId> {
    fn visit(
        types: &[TypeDef],
        iface: TypeDefId,
        visited: &mut FxHashSet<TypeDefId>,
        out: &mut Vec<TypeDefId>,
    ) {
        if !visited.insert(iface) {
            return;
        }
        for &base in types[iface.index()].interfaces.iter().rev() {
            visit(types, base, visited, out);
        }
        out.push(iface);
    }

    let mut visited = FxHashSet::default();
    let mut result = Vec::new();
    let mut current = Some(ty);
    while let Some(t) = current {
        let def = &types[t.index()];
        for &iface in def.interfaces.iter().rev() {
            visit(types, iface, &mut visited, &mut result);
        }
        current = def.base;
    }
    result.reverse();
    result
}

#[cfg(test)]
#[path = "../tests/member_graph_tests.rs"]
mod tests;
