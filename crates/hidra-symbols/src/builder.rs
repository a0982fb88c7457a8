//! Construction of an in-memory [`MemberGraph`].
//!
//! Adding declarations is infallible; problems are recorded and reported by
//! [`GraphBuilder::finish`], which also validates the inheritance structure
//! and precomputes the lookup tables the resolver queries.
//!
//! ## Usage
//!
//! ```ignore
//! let mut b = GraphBuilder::new();
//! let app = b.add_assembly("App", AssemblyOptions::source());
//! let base = b.add_type(app, TypeDecl::class("Base"));
//! let derived = b.add_type(app, TypeDecl::class("Derived").base(base));
//! let m = b.add_method(base, MethodDecl::new("M").flags(MemberFlags::VIRTUAL));
//! let graph = b.finish()?;
//! ```

use crate::ids::{AssemblyId, MemberId, TypeDefId};
use crate::member::{
    AccessorOf, AccessorRole, Accessibility, EventInfo, FieldInfo, Member, MemberData,
    MemberFlags, MethodInfo, MethodKind, NestedTypeInfo, PropertyInfo,
};
use crate::member_graph::{MemberGraph, NameTable, topologically_sorted_interfaces};
use crate::type_def::{AssemblyInfo, TypeDef, TypeKind};
use crate::types::{SigType, TypeSig};
use hidra_common::Interner;
use rustc_hash::FxHashMap;
use std::fmt;
use tracing::{debug, trace};

// =============================================================================
// Errors
// =============================================================================

/// A structural problem found while building a member graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphError {
    UnknownAssembly(AssemblyId),
    UnknownType(TypeDefId),
    UnknownMember(MemberId),
    /// An interface declared a base class.
    InterfaceWithBase { ty: String },
    /// A class-like type named an interface as its base.
    BaseIsInterface { ty: String, base: String },
    /// A type listed a non-interface among its interfaces.
    NotAnInterface { ty: String, interface: String },
    CyclicInheritance { ty: String },
    ArityMismatch { ty: String, expected: u32, found: usize },
    /// Only generic definitions (not instantiations) can be constructed.
    NotGenericDefinition { ty: String },
    NotAMethod(MemberId),
    /// An accessor whose property/event does not link back to it.
    AccessorMismatch { accessor: MemberId },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAssembly(id) => write!(f, "unknown assembly {id:?}"),
            Self::UnknownType(id) => write!(f, "unknown type {id:?}"),
            Self::UnknownMember(id) => write!(f, "unknown member {id:?}"),
            Self::InterfaceWithBase { ty } => {
                write!(f, "interface '{ty}' cannot declare a base class")
            }
            Self::BaseIsInterface { ty, base } => {
                write!(f, "type '{ty}' cannot use interface '{base}' as its base class")
            }
            Self::NotAnInterface { ty, interface } => {
                write!(f, "type '{ty}' lists '{interface}' as an interface, but it is not one")
            }
            Self::CyclicInheritance { ty } => {
                write!(f, "type '{ty}' is part of an inheritance cycle")
            }
            Self::ArityMismatch {
                ty,
                expected,
                found,
            } => write!(
                f,
                "'{ty}' expects {expected} type argument(s) but {found} were supplied"
            ),
            Self::NotGenericDefinition { ty } => {
                write!(f, "'{ty}' is not a generic type definition")
            }
            Self::NotAMethod(id) => write!(f, "member {id:?} is not a method"),
            Self::AccessorMismatch { accessor } => write!(
                f,
                "accessor {accessor:?} is not linked from its associated property or event"
            ),
        }
    }
}

impl std::error::Error for GraphError {}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AssemblyOptions {
    pub is_source: bool,
    pub supports_covariant_return_dispatch: bool,
}

impl AssemblyOptions {
    /// The compilation being analyzed.
    pub const fn source() -> Self {
        Self {
            is_source: true,
            supports_covariant_return_dispatch: false,
        }
    }

    /// Imported metadata.
    pub const fn metadata() -> Self {
        Self {
            is_source: false,
            supports_covariant_return_dispatch: false,
        }
    }

    pub const fn with_covariant_returns(mut self) -> Self {
        self.supports_covariant_return_dispatch = true;
        self
    }
}

#[derive(Clone, Debug)]
pub struct TypeDecl {
    name: String,
    kind: TypeKind,
    arity: u32,
    base: Option<TypeDefId>,
    interfaces: Vec<TypeDefId>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            arity: 0,
            base: None,
            interfaces: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    pub fn arity(mut self, arity: u32) -> Self {
        self.arity = arity;
        self
    }

    pub fn base(mut self, base: TypeDefId) -> Self {
        self.base = Some(base);
        self
    }

    pub fn interfaces(mut self, interfaces: &[TypeDefId]) -> Self {
        self.interfaces.extend_from_slice(interfaces);
        self
    }
}

#[derive(Clone, Debug)]
pub struct MethodDecl {
    name: String,
    kind: MethodKind,
    type_params: u32,
    params: Vec<SigType>,
    ret: SigType,
    flags: MemberFlags,
    accessibility: Accessibility,
    metadata_virtual: Option<bool>,
}

impl MethodDecl {
    /// A public, non-generic, parameterless ordinary method returning void.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MethodKind::Ordinary,
            type_params: 0,
            params: Vec::new(),
            ret: SigType::void(),
            flags: MemberFlags::empty(),
            accessibility: Accessibility::Public,
            metadata_virtual: None,
        }
    }

    pub fn kind(mut self, kind: MethodKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn type_params(mut self, count: u32) -> Self {
        self.type_params = count;
        self
    }

    pub fn param(mut self, param: impl Into<SigType>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn returns(mut self, ret: impl Into<SigType>) -> Self {
        self.ret = ret.into();
        self
    }

    pub fn flags(mut self, flags: MemberFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Force the runtime `virtual` bit on or off. By default it is set for
    /// virtual, abstract and override methods.
    pub fn metadata_virtual(mut self, value: bool) -> Self {
        self.metadata_virtual = Some(value);
        self
    }
}

#[derive(Clone, Debug)]
pub struct PropertyDecl {
    name: String,
    ty: SigType,
    params: Vec<SigType>,
    is_indexer: bool,
    is_indexed_property: bool,
    flags: MemberFlags,
    accessibility: Accessibility,
    getter: Option<Accessibility>,
    setter: Option<Accessibility>,
}

impl PropertyDecl {
    /// A public property without accessors; add them with `getter` / `setter`.
    pub fn new(name: impl Into<String>, ty: impl Into<SigType>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            params: Vec::new(),
            is_indexer: false,
            is_indexed_property: false,
            flags: MemberFlags::empty(),
            accessibility: Accessibility::Public,
            getter: None,
            setter: None,
        }
    }

    /// The default indexer, `this[...]`, named `Item`.
    pub fn indexer(ty: impl Into<SigType>, params: Vec<SigType>) -> Self {
        let mut decl = Self::new("Item", ty);
        decl.params = params;
        decl.is_indexer = true;
        decl
    }

    /// A named parameterized property imported from another language.
    pub fn indexed_property(
        name: impl Into<String>,
        ty: impl Into<SigType>,
        params: Vec<SigType>,
    ) -> Self {
        let mut decl = Self::new(name, ty);
        decl.params = params;
        decl.is_indexed_property = true;
        decl
    }

    pub fn flags(mut self, flags: MemberFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn getter(mut self) -> Self {
        self.getter = Some(self.accessibility);
        self
    }

    pub fn setter(mut self) -> Self {
        self.setter = Some(self.accessibility);
        self
    }

    pub fn setter_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.setter = Some(accessibility);
        self
    }
}

#[derive(Clone, Debug)]
pub struct EventDecl {
    name: String,
    ty: SigType,
    flags: MemberFlags,
    accessibility: Accessibility,
}

impl EventDecl {
    pub fn new(name: impl Into<String>, ty: impl Into<SigType>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            flags: MemberFlags::empty(),
            accessibility: Accessibility::Public,
        }
    }

    pub fn flags(mut self, flags: MemberFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }
}

/// Ids of a property and its accessors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PropertyHandle {
    pub property: MemberId,
    pub getter: Option<MemberId>,
    pub setter: Option<MemberId>,
}

/// Ids of an event and its accessors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EventHandle {
    pub event: MemberId,
    pub adder: MemberId,
    pub remover: MemberId,
}

fn with_metadata_virtual(flags: MemberFlags, explicit: Option<bool>) -> MemberFlags {
    let virtual_bit = explicit.unwrap_or_else(|| {
        flags.intersects(MemberFlags::VIRTUAL | MemberFlags::ABSTRACT | MemberFlags::OVERRIDE)
    });
    if virtual_bit {
        flags | MemberFlags::METADATA_VIRTUAL
    } else {
        flags - MemberFlags::METADATA_VIRTUAL
    }
}

// =============================================================================
// GraphBuilder
// =============================================================================

pub struct GraphBuilder {
    interner: Interner,
    assemblies: Vec<AssemblyInfo>,
    types: Vec<TypeDef>,
    members: Vec<Member>,
    override_hints: FxHashMap<MemberId, MemberId>,
    instantiations: FxHashMap<(TypeDefId, Vec<TypeSig>), TypeDefId>,
    errors: Vec<GraphError>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            interner: Interner::new(),
            assemblies: Vec::new(),
            types: Vec::new(),
            members: Vec::new(),
            override_hints: FxHashMap::default(),
            instantiations: FxHashMap::default(),
            errors: Vec::new(),
        }
    }

    pub fn add_assembly(&mut self, name: &str, options: AssemblyOptions) -> AssemblyId {
        let id = AssemblyId(self.assemblies.len() as u32);
        let name = self.interner.intern(name);
        self.assemblies.push(AssemblyInfo {
            id,
            name,
            is_source: options.is_source,
            supports_covariant_return_dispatch: options.supports_covariant_return_dispatch,
        });
        id
    }

    pub fn add_type(&mut self, assembly: AssemblyId, decl: TypeDecl) -> TypeDefId {
        if assembly.index() >= self.assemblies.len() {
            self.errors.push(GraphError::UnknownAssembly(assembly));
        }
        let id = TypeDefId(self.types.len() as u32);
        let name = self.interner.intern(&decl.name);
        trace!(type_id = %id, name = %decl.name, kind = ?decl.kind, "GraphBuilder::add_type");
        self.types.push(TypeDef {
            id,
            name,
            kind: decl.kind,
            assembly,
            arity: decl.arity,
            base: decl.base,
            interfaces: decl.interfaces,
            members: Vec::new(),
            constructed_from: None,
            type_args: Vec::new(),
        });
        id
    }

    /// Intern a name in the graph's string table.
    pub fn intern(&mut self, name: &str) -> hidra_common::Atom {
        self.interner.intern(name)
    }

    fn push_member(
        &mut self,
        ty: TypeDefId,
        name: &str,
        accessibility: Accessibility,
        flags: MemberFlags,
        data: MemberData,
    ) -> MemberId {
        let id = MemberId(self.members.len() as u32);
        let name = self.interner.intern(name);
        match self.types.get_mut(ty.index()) {
            Some(def) => def.members.push(id),
            None => self.errors.push(GraphError::UnknownType(ty)),
        }
        self.members.push(Member {
            id,
            name,
            containing_type: ty,
            accessibility,
            flags,
            original_definition: None,
            data,
        });
        id
    }

    pub fn add_method(&mut self, ty: TypeDefId, decl: MethodDecl) -> MemberId {
        let flags = with_metadata_virtual(decl.flags, decl.metadata_virtual);
        let flags = if decl.kind == MethodKind::ExplicitInterfaceImplementation {
            flags | MemberFlags::EXPLICIT_INTERFACE_IMPL
        } else {
            flags
        };
        self.push_member(
            ty,
            &decl.name,
            decl.accessibility,
            flags,
            MemberData::Method(MethodInfo {
                method_kind: decl.kind,
                type_params: decl.type_params,
                params: decl.params,
                ret: decl.ret,
                accessor_of: None,
                constructed_from: None,
            }),
        )
    }

    pub fn add_property(&mut self, ty: TypeDefId, decl: PropertyDecl) -> PropertyHandle {
        let flags = with_metadata_virtual(decl.flags, None);
        let property = self.push_member(
            ty,
            &decl.name,
            decl.accessibility,
            flags,
            MemberData::Property(PropertyInfo {
                ty: decl.ty.clone(),
                params: decl.params.clone(),
                is_indexer: decl.is_indexer,
                is_indexed_property: decl.is_indexed_property,
                getter: None,
                setter: None,
            }),
        );

        let getter = decl.getter.map(|accessibility| {
            let info = MethodInfo {
                method_kind: MethodKind::PropertyGet,
                type_params: 0,
                params: decl.params.clone(),
                ret: decl.ty.clone(),
                accessor_of: Some(AccessorOf {
                    associated: property,
                    role: AccessorRole::Get,
                }),
                constructed_from: None,
            };
            let name = format!("get_{}", decl.name);
            self.push_member(ty, &name, accessibility, flags, MemberData::Method(info))
        });

        let setter = decl.setter.map(|accessibility| {
            let mut params = decl.params.clone();
            params.push(SigType::new(decl.ty.ty.clone()));
            let info = MethodInfo {
                method_kind: MethodKind::PropertySet,
                type_params: 0,
                params,
                ret: SigType::void(),
                accessor_of: Some(AccessorOf {
                    associated: property,
                    role: AccessorRole::Set,
                }),
                constructed_from: None,
            };
            let name = format!("set_{}", decl.name);
            self.push_member(ty, &name, accessibility, flags, MemberData::Method(info))
        });

        if let MemberData::Property(info) = &mut self.members[property.index()].data {
            info.getter = getter;
            info.setter = setter;
        }
        PropertyHandle {
            property,
            getter,
            setter,
        }
    }

    pub fn add_event(&mut self, ty: TypeDefId, decl: EventDecl) -> EventHandle {
        let flags = with_metadata_virtual(decl.flags, None);
        let event = self.push_member(
            ty,
            &decl.name,
            decl.accessibility,
            flags,
            MemberData::Event(EventInfo {
                ty: decl.ty.clone(),
                adder: None,
                remover: None,
            }),
        );
        let mut accessor = |role: AccessorRole, prefix: &str| {
            let info = MethodInfo {
                method_kind: role.method_kind(),
                type_params: 0,
                params: vec![SigType::new(decl.ty.ty.clone())],
                ret: SigType::void(),
                accessor_of: Some(AccessorOf {
                    associated: event,
                    role,
                }),
                constructed_from: None,
            };
            let name = format!("{prefix}_{}", decl.name);
            self.push_member(ty, &name, decl.accessibility, flags, MemberData::Method(info))
        };
        let adder = accessor(AccessorRole::Add, "add");
        let remover = accessor(AccessorRole::Remove, "remove");

        if let MemberData::Event(info) = &mut self.members[event.index()].data {
            info.adder = Some(adder);
            info.remover = Some(remover);
        }
        EventHandle {
            event,
            adder,
            remover,
        }
    }

    pub fn add_field(
        &mut self,
        ty: TypeDefId,
        name: &str,
        field_type: impl Into<SigType>,
        accessibility: Accessibility,
        flags: MemberFlags,
    ) -> MemberId {
        self.push_member(
            ty,
            name,
            accessibility,
            flags,
            MemberData::Field(FieldInfo {
                ty: field_type.into(),
            }),
        )
    }

    /// Declare `nested` as a member type of `ty`.
    pub fn add_nested_type(
        &mut self,
        ty: TypeDefId,
        nested: TypeDefId,
        accessibility: Accessibility,
    ) -> MemberId {
        let (name, arity) = match self.types.get(nested.index()) {
            Some(def) => (self.interner.resolve(def.name).to_string(), def.arity),
            None => {
                self.errors.push(GraphError::UnknownType(nested));
                (String::new(), 0)
            }
        };
        self.push_member(
            ty,
            &name,
            accessibility,
            MemberFlags::empty(),
            MemberData::NamedType(NestedTypeInfo {
                type_def: nested,
                arity,
            }),
        )
    }

    /// Record that `method` overrides `target` regardless of signature
    /// matching (a covariant-return override resolved when it was declared).
    pub fn set_override_hint(&mut self, method: MemberId, target: MemberId) {
        self.override_hints.insert(method, target);
    }

    /// Instantiate the generic type `definition` with `args`.
    ///
    /// The constructed type gets substituted copies of every member the
    /// definition has *at this point*, so add members before constructing.
    /// Repeated requests for the same instantiation return the same id.
    pub fn construct_type(
        &mut self,
        definition: TypeDefId,
        args: Vec<TypeSig>,
    ) -> Result<TypeDefId, GraphError> {
        let def = self
            .types
            .get(definition.index())
            .ok_or(GraphError::UnknownType(definition))?
            .clone();
        let display = self.interner.resolve(def.name).to_string();
        if !def.is_definition() {
            return Err(GraphError::NotGenericDefinition { ty: display });
        }
        if def.arity == 0 || def.arity as usize != args.len() {
            return Err(GraphError::ArityMismatch {
                ty: display,
                expected: def.arity,
                found: args.len(),
            });
        }
        let key = (definition, args);
        if let Some(&existing) = self.instantiations.get(&key) {
            return Ok(existing);
        }
        let (_, args) = key;

        let id = TypeDefId(self.types.len() as u32);
        self.instantiations.insert((definition, args.clone()), id);
        self.types.push(TypeDef {
            id,
            name: def.name,
            kind: def.kind,
            assembly: def.assembly,
            arity: def.arity,
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            constructed_from: Some(definition),
            type_args: args.clone(),
        });
        debug!(definition = %definition, constructed = %id, ?args, "GraphBuilder::construct_type");

        let base = match def.base {
            Some(base) => Some(self.substitute_type_ref(base, &args)?),
            None => None,
        };
        let mut interfaces = Vec::with_capacity(def.interfaces.len());
        for &iface in &def.interfaces {
            interfaces.push(self.substitute_type_ref(iface, &args)?);
        }

        // Allocate all ids up front so accessor links can be remapped.
        let first = self.members.len() as u32;
        let remap: FxHashMap<MemberId, MemberId> = def
            .members
            .iter()
            .enumerate()
            .map(|(i, &old)| (old, MemberId(first + i as u32)))
            .collect();
        let map = |old: MemberId| remap.get(&old).copied().unwrap_or(old);

        let mut new_members = Vec::with_capacity(def.members.len());
        for &old in &def.members {
            let source = &self.members[old.index()];
            let data = match &source.data {
                MemberData::Method(m) => MemberData::Method(MethodInfo {
                    method_kind: m.method_kind,
                    type_params: m.type_params,
                    params: m.params.iter().map(|p| p.substitute(&args)).collect(),
                    ret: m.ret.substitute(&args),
                    accessor_of: m.accessor_of.map(|a| AccessorOf {
                        associated: map(a.associated),
                        role: a.role,
                    }),
                    constructed_from: m.constructed_from,
                }),
                MemberData::Property(p) => MemberData::Property(PropertyInfo {
                    ty: p.ty.substitute(&args),
                    params: p.params.iter().map(|q| q.substitute(&args)).collect(),
                    is_indexer: p.is_indexer,
                    is_indexed_property: p.is_indexed_property,
                    getter: p.getter.map(map),
                    setter: p.setter.map(map),
                }),
                MemberData::Event(e) => MemberData::Event(EventInfo {
                    ty: e.ty.substitute(&args),
                    adder: e.adder.map(map),
                    remover: e.remover.map(map),
                }),
                MemberData::Field(f) => MemberData::Field(FieldInfo {
                    ty: f.ty.substitute(&args),
                }),
                MemberData::NamedType(t) => MemberData::NamedType(t.clone()),
            };
            new_members.push(Member {
                id: map(old),
                name: source.name,
                containing_type: id,
                accessibility: source.accessibility,
                flags: source.flags,
                original_definition: Some(old),
                data,
            });
        }

        let constructed = &mut self.types[id.index()];
        constructed.base = base;
        constructed.interfaces = interfaces;
        constructed.members = new_members.iter().map(|m| m.id).collect();
        self.members.extend(new_members);
        Ok(id)
    }

    /// Re-instantiate `ty` under `args` if it is an open instantiation
    /// (mentions the enclosing definition's type parameters).
    fn substitute_type_ref(
        &mut self,
        ty: TypeDefId,
        args: &[TypeSig],
    ) -> Result<TypeDefId, GraphError> {
        let def = self.types.get(ty.index()).ok_or(GraphError::UnknownType(ty))?;
        let Some(generic) = def.constructed_from else {
            return Ok(ty);
        };
        if !def.type_args.iter().any(TypeSig::mentions_type_params) {
            return Ok(ty);
        }
        let new_args = def.type_args.iter().map(|a| a.substitute(args)).collect();
        self.construct_type(generic, new_args)
    }

    /// Instantiate a generic method with method type arguments.
    ///
    /// The instance is a graph member but not listed among its type's
    /// members, mirroring how call sites refer to `M<int>`.
    pub fn instantiate_method(
        &mut self,
        method: MemberId,
        args: Vec<TypeSig>,
    ) -> Result<MemberId, GraphError> {
        let source = self
            .members
            .get(method.index())
            .ok_or(GraphError::UnknownMember(method))?
            .clone();
        let MemberData::Method(info) = &source.data else {
            return Err(GraphError::NotAMethod(method));
        };
        if info.type_params == 0 || info.type_params as usize != args.len() {
            return Err(GraphError::ArityMismatch {
                ty: self.interner.resolve(source.name).to_string(),
                expected: info.type_params,
                found: args.len(),
            });
        }
        let data = MemberData::Method(MethodInfo {
            method_kind: info.method_kind,
            type_params: info.type_params,
            params: info.params.iter().map(|p| p.substitute_method(&args)).collect(),
            ret: info.ret.substitute_method(&args),
            accessor_of: None,
            constructed_from: Some(method),
        });
        let id = MemberId(self.members.len() as u32);
        trace!(generic = %method, instance = %id, "GraphBuilder::instantiate_method");
        self.members.push(Member {
            id,
            data,
            ..source
        });
        Ok(id)
    }

    /// Validate and freeze the graph.
    pub fn finish(mut self) -> Result<MemberGraph, GraphError> {
        if let Some(err) = self.errors.drain(..).next() {
            return Err(err);
        }
        self.validate_types()?;
        self.validate_members()?;

        let mut by_name = NameTable::default();
        for def in &self.types {
            for &member in &def.members {
                let name = self.members[member.index()].name;
                by_name.entry((def.id, name)).or_default().push(member);
            }
        }
        let all_interfaces = self
            .types
            .iter()
            .map(|t| topologically_sorted_interfaces(&self.types, t.id))
            .collect();

        debug!(
            types = self.types.len(),
            members = self.members.len(),
            "GraphBuilder::finish"
        );
        Ok(MemberGraph {
            interner: self.interner,
            assemblies: self.assemblies,
            types: self.types,
            members: self.members,
            by_name,
            all_interfaces,
            override_hints: self.override_hints,
        })
    }

    fn type_name(&self, ty: TypeDefId) -> String {
        self.types
            .get(ty.index())
            .map(|t| self.interner.resolve(t.name).to_string())
            .unwrap_or_else(|| format!("{ty:?}"))
    }

    fn validate_types(&self) -> Result<(), GraphError> {
        for def in &self.types {
            if def.assembly.index() >= self.assemblies.len() {
                return Err(GraphError::UnknownAssembly(def.assembly));
            }
            if let Some(base) = def.base {
                let base_def = self.types.get(base.index()).ok_or(GraphError::UnknownType(base))?;
                if def.is_interface() {
                    return Err(GraphError::InterfaceWithBase {
                        ty: self.type_name(def.id),
                    });
                }
                if base_def.is_interface() {
                    return Err(GraphError::BaseIsInterface {
                        ty: self.type_name(def.id),
                        base: self.type_name(base),
                    });
                }
            }
            for &iface in &def.interfaces {
                let iface_def = self.types.get(iface.index()).ok_or(GraphError::UnknownType(iface))?;
                if !iface_def.is_interface() {
                    return Err(GraphError::NotAnInterface {
                        ty: self.type_name(def.id),
                        interface: self.type_name(iface),
                    });
                }
            }
        }

        // Base chains: a chain longer than the number of types must revisit one.
        for def in &self.types {
            let mut steps = 0usize;
            let mut current = def.base;
            while let Some(t) = current {
                steps += 1;
                if steps > self.types.len() {
                    return Err(GraphError::CyclicInheritance {
                        ty: self.type_name(def.id),
                    });
                }
                current = self.types[t.index()].base;
            }
        }

        // Interface lattices: depth-first search with an on-stack marker.
        #[derive(Copy, Clone, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }
        fn visit(types: &[TypeDef], ty: TypeDefId, marks: &mut [Mark]) -> Result<(), TypeDefId> {
            match marks[ty.index()] {
                Mark::Done => return Ok(()),
                Mark::InProgress => return Err(ty),
                Mark::Unvisited => {}
            }
            marks[ty.index()] = Mark::InProgress;
            for &iface in &types[ty.index()].interfaces {
                visit(types, iface, marks)?;
            }
            marks[ty.index()] = Mark::Done;
            Ok(())
        }
        let mut marks = vec![Mark::Unvisited; self.types.len()];
        for def in &self.types {
            if let Err(ty) = visit(&self.types, def.id, &mut marks) {
                return Err(GraphError::CyclicInheritance {
                    ty: self.type_name(ty),
                });
            }
        }
        Ok(())
    }

    fn validate_members(&self) -> Result<(), GraphError> {
        let get = |id: MemberId| self.members.get(id.index()).ok_or(GraphError::UnknownMember(id));
        for member in &self.members {
            if member.containing_type.index() >= self.types.len() {
                return Err(GraphError::UnknownType(member.containing_type));
            }
            let Some(link) = member.accessor_of() else {
                continue;
            };
            let owner = get(link.associated)?;
            if owner.accessor(link.role) != Some(member.id) {
                return Err(GraphError::AccessorMismatch {
                    accessor: member.id,
                });
            }
        }
        for (&method, &target) in &self.override_hints {
            for id in [method, target] {
                if get(id)?.as_method().is_none() {
                    return Err(GraphError::NotAMethod(id));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod tests;
