//! The symbol-graph collaborator interface.
//!
//! The resolver consumes an already resolved, immutable member graph through
//! this trait. It never builds or mutates the graph; any implementation that
//! answers these queries consistently (and is `Sync`, so queries can run on
//! several threads at once) can be resolved against.

use crate::ids::{AssemblyId, MemberId, TypeDefId};
use crate::member::Member;
use crate::type_def::{AssemblyInfo, TypeDef};
use hidra_common::{Atom, Interner};

pub trait SymbolGraph: Sync {
    /// Look up a member record.
    ///
    /// Unknown ids are a contract violation and may panic.
    fn member(&self, id: MemberId) -> &Member;

    /// Look up a type record. Unknown ids may panic.
    fn type_def(&self, id: TypeDefId) -> &TypeDef;

    fn assembly(&self, id: AssemblyId) -> &AssemblyInfo;

    /// Members of `ty` (not inherited ones) named `name`, in declaration order.
    fn members_by_name(&self, ty: TypeDefId, name: Atom) -> &[MemberId];

    fn base_type(&self, ty: TypeDefId) -> Option<TypeDefId> {
        self.type_def(ty).base
    }

    fn direct_interfaces(&self, ty: TypeDefId) -> &[TypeDefId] {
        &self.type_def(ty).interfaces
    }

    /// Every interface `ty` implements, directly or transitively.
    ///
    /// Each interface appears before all of the interfaces it extends, and
    /// interfaces with no ordering constraint between them keep declaration
    /// order.
    fn all_interfaces(&self, ty: TypeDefId) -> &[TypeDefId];

    /// Whether `member` may be overridden or hidden from inside `from_type`.
    fn is_accessible(&self, member: MemberId, from_type: TypeDefId) -> bool;

    /// A covariant-return override target recorded for `method` when it was
    /// declared, if any.
    fn known_override_hint(&self, method: MemberId) -> Option<MemberId>;

    fn supports_covariant_return_dispatch(&self, assembly: AssemblyId) -> bool {
        self.assembly(assembly).supports_covariant_return_dispatch
    }

    /// Whether `member` belongs to the compilation being analyzed.
    fn is_from_source(&self, member: MemberId) -> bool {
        let ty = self.type_def(self.member(member).containing_type);
        self.assembly(ty.assembly).is_source
    }

    fn names(&self) -> &Interner;

    /// Display name of a member, for tracing and test output.
    fn display_member(&self, id: MemberId) -> String {
        let member = self.member(id);
        let ty = self.type_def(member.containing_type);
        format!(
            "{}.{}",
            self.names().resolve(ty.name),
            self.names().resolve(member.name)
        )
    }
}
