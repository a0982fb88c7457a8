//! Member records.
//!
//! A member is a closed tagged union over the five kinds the resolver knows
//! about. Every decision point in the resolver matches on [`MemberData`]
//! exhaustively, so adding a kind forces every rule to be revisited.

use crate::ids::{MemberId, TypeDefId};
use crate::types::SigType;
use hidra_common::Atom;

/// Declared accessibility of a member.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Accessibility {
    Private,
    /// `private protected`: derived types within the same assembly.
    ProtectedAndInternal,
    Protected,
    Internal,
    /// `protected internal`: derived types or the same assembly.
    ProtectedOrInternal,
    Public,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    Property,
    Event,
    Field,
    NamedType,
}

/// What sort of method a method member is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Ordinary,
    Constructor,
    StaticConstructor,
    Destructor,
    Operator,
    Conversion,
    ExplicitInterfaceImplementation,
    DelegateInvoke,
    PropertyGet,
    PropertySet,
    EventAdd,
    EventRemove,
}

impl MethodKind {
    pub const fn accessor_role(self) -> Option<AccessorRole> {
        match self {
            Self::PropertyGet => Some(AccessorRole::Get),
            Self::PropertySet => Some(AccessorRole::Set),
            Self::EventAdd => Some(AccessorRole::Add),
            Self::EventRemove => Some(AccessorRole::Remove),
            _ => None,
        }
    }

    /// Methods of these kinds never hide, and are never hidden by, methods,
    /// properties or nested types.
    pub const fn is_special_name(self) -> bool {
        matches!(
            self,
            Self::Constructor
                | Self::StaticConstructor
                | Self::Destructor
                | Self::Operator
                | Self::Conversion
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AccessorRole {
    Get,
    Set,
    Add,
    Remove,
}

impl AccessorRole {
    pub const fn method_kind(self) -> MethodKind {
        match self {
            Self::Get => MethodKind::PropertyGet,
            Self::Set => MethodKind::PropertySet,
            Self::Add => MethodKind::EventAdd,
            Self::Remove => MethodKind::EventRemove,
        }
    }
}

bitflags::bitflags! {
    /// Declaration modifiers shared by methods, properties and events.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MemberFlags: u16 {
        const STATIC = 1 << 0;
        const VIRTUAL = 1 << 1;
        const ABSTRACT = 1 << 2;
        const OVERRIDE = 1 << 3;
        const SEALED = 1 << 4;
        /// Carries the runtime `virtual` bit, whatever the language modifiers say.
        const METADATA_VIRTUAL = 1 << 5;
        const EXPLICIT_INTERFACE_IMPL = 1 << 6;
    }
}

/// Links an accessor method back to its property or event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AccessorOf {
    pub associated: MemberId,
    pub role: AccessorRole,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodInfo {
    pub method_kind: MethodKind,
    /// Generic method arity.
    pub type_params: u32,
    pub params: Vec<SigType>,
    pub ret: SigType,
    pub accessor_of: Option<AccessorOf>,
    /// Set for a generic method instantiated with type arguments.
    pub constructed_from: Option<MemberId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyInfo {
    pub ty: SigType,
    /// Indexer (or indexed-property) parameters; empty for plain properties.
    pub params: Vec<SigType>,
    pub is_indexer: bool,
    /// A parameterized property that is not the type's default indexer.
    /// Only imported from metadata produced by other languages.
    pub is_indexed_property: bool,
    pub getter: Option<MemberId>,
    pub setter: Option<MemberId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventInfo {
    pub ty: SigType,
    pub adder: Option<MemberId>,
    pub remover: Option<MemberId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldInfo {
    pub ty: SigType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NestedTypeInfo {
    pub type_def: TypeDefId,
    pub arity: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberData {
    Method(MethodInfo),
    Property(PropertyInfo),
    Event(EventInfo),
    Field(FieldInfo),
    NamedType(NestedTypeInfo),
}

/// A member node of the symbol graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub name: Atom,
    pub containing_type: TypeDefId,
    pub accessibility: Accessibility,
    pub flags: MemberFlags,
    /// For members of a constructed generic type: the member of the
    /// generic definition this one was substituted from.
    pub original_definition: Option<MemberId>,
    pub data: MemberData,
}

impl Member {
    pub const fn kind(&self) -> MemberKind {
        match &self.data {
            MemberData::Method(_) => MemberKind::Method,
            MemberData::Property(_) => MemberKind::Property,
            MemberData::Event(_) => MemberKind::Event,
            MemberData::Field(_) => MemberKind::Field,
            MemberData::NamedType(_) => MemberKind::NamedType,
        }
    }

    /// Generic parameter count; zero for kinds that cannot be generic.
    pub const fn arity(&self) -> u32 {
        match &self.data {
            MemberData::Method(m) => m.type_params,
            MemberData::NamedType(t) => t.arity,
            MemberData::Property(_) | MemberData::Event(_) | MemberData::Field(_) => 0,
        }
    }

    pub const fn as_method(&self) -> Option<&MethodInfo> {
        match &self.data {
            MemberData::Method(m) => Some(m),
            _ => None,
        }
    }

    pub const fn as_property(&self) -> Option<&PropertyInfo> {
        match &self.data {
            MemberData::Property(p) => Some(p),
            _ => None,
        }
    }

    pub const fn as_event(&self) -> Option<&EventInfo> {
        match &self.data {
            MemberData::Event(e) => Some(e),
            _ => None,
        }
    }

    pub const fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }

    pub const fn is_override(&self) -> bool {
        self.flags.contains(MemberFlags::OVERRIDE)
    }

    pub const fn is_metadata_virtual(&self) -> bool {
        self.flags.contains(MemberFlags::METADATA_VIRTUAL)
    }

    pub fn is_explicit_interface_impl(&self) -> bool {
        self.flags.contains(MemberFlags::EXPLICIT_INTERFACE_IMPL)
            || matches!(
                &self.data,
                MemberData::Method(m) if m.method_kind == MethodKind::ExplicitInterfaceImplementation
            )
    }

    pub fn accessor_of(&self) -> Option<AccessorOf> {
        self.as_method().and_then(|m| m.accessor_of)
    }

    pub fn is_accessor(&self) -> bool {
        self.accessor_of().is_some()
    }

    pub const fn is_indexer(&self) -> bool {
        matches!(&self.data, MemberData::Property(p) if p.is_indexer)
    }

    /// The member's parameter list (indexer parameters for properties).
    pub fn params(&self) -> &[SigType] {
        match &self.data {
            MemberData::Method(m) => &m.params,
            MemberData::Property(p) => &p.params,
            MemberData::Event(_) | MemberData::Field(_) | MemberData::NamedType(_) => &[],
        }
    }

    /// Return type of a method, or the declared type of a property, event or
    /// field.
    pub const fn return_type(&self) -> Option<&SigType> {
        match &self.data {
            MemberData::Method(m) => Some(&m.ret),
            MemberData::Property(p) => Some(&p.ty),
            MemberData::Event(e) => Some(&e.ty),
            MemberData::Field(f) => Some(&f.ty),
            MemberData::NamedType(_) => None,
        }
    }

    /// Total custom modifiers across parameters and return type.
    pub fn custom_modifier_count(&self) -> usize {
        let params: usize = self.params().iter().map(SigType::custom_modifier_count).sum();
        params + self.return_type().map_or(0, SigType::custom_modifier_count)
    }

    /// The accessor of `role`, for properties and events.
    pub fn accessor(&self, role: AccessorRole) -> Option<MemberId> {
        match (&self.data, role) {
            (MemberData::Property(p), AccessorRole::Get) => p.getter,
            (MemberData::Property(p), AccessorRole::Set) => p.setter,
            (MemberData::Event(e), AccessorRole::Add) => e.adder,
            (MemberData::Event(e), AccessorRole::Remove) => e.remover,
            _ => None,
        }
    }

    /// Whether a member of `hiding_kind` can hide this member.
    ///
    /// Constructors, operators and the like are invisible to hiding by
    /// methods, properties and nested types; fields and events hide anything.
    pub fn can_be_hidden_by(&self, hiding_kind: MemberKind) -> bool {
        let MemberData::Method(method) = &self.data else {
            return true;
        };
        match hiding_kind {
            MemberKind::Method | MemberKind::Property | MemberKind::NamedType => {
                !method.method_kind.is_special_name()
            }
            MemberKind::Field | MemberKind::Event => true,
        }
    }
}
