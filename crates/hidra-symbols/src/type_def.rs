//! Type and assembly records.

use crate::ids::{AssemblyId, MemberId, TypeDefId};
use crate::types::TypeSig;
use hidra_common::Atom;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Delegate,
}

impl TypeKind {
    /// Everything except interfaces resolves overrides through a base chain.
    pub const fn is_class_like(self) -> bool {
        !matches!(self, Self::Interface)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDef {
    pub id: TypeDefId,
    pub name: Atom,
    pub kind: TypeKind,
    pub assembly: AssemblyId,
    /// Generic arity of the definition.
    pub arity: u32,
    pub base: Option<TypeDefId>,
    /// Directly declared interfaces, in declaration order.
    pub interfaces: Vec<TypeDefId>,
    /// Members in declaration order.
    pub members: Vec<MemberId>,
    /// For a constructed generic type: the definition it instantiates.
    pub constructed_from: Option<TypeDefId>,
    pub type_args: Vec<TypeSig>,
}

impl TypeDef {
    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface)
    }

    /// `false` for constructed instantiations of a generic type.
    pub const fn is_definition(&self) -> bool {
        self.constructed_from.is_none()
    }

    /// The generic definition, or this type itself.
    pub fn original_definition(&self) -> TypeDefId {
        self.constructed_from.unwrap_or(self.id)
    }
}

/// A compilation unit: either the one being compiled or imported metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssemblyInfo {
    pub id: AssemblyId,
    pub name: Atom,
    /// Members of source assemblies use the language's own signature rules;
    /// imported members are matched with the runtime's.
    pub is_source: bool,
    /// Whether the targeted runtime dispatches covariant-return overrides.
    pub supports_covariant_return_dispatch: bool,
}
