//! Member graph model for the hidra override resolver.
//!
//! This crate defines what the resolver reads:
//!
//! - **Members and types**: a closed [`MemberData`] union over methods,
//!   properties, events, fields and nested types, plus [`TypeDef`] records
//!   with base types and declared interfaces
//! - **Signatures**: [`SigType`] with ref-kinds and custom modifiers
//! - **[`SymbolGraph`]**: the read-only query interface the resolver consumes
//! - **[`MemberGraph`]**: an in-memory implementation, built with
//!   [`GraphBuilder`] or loaded from a JSON [`GraphFixture`]

pub mod builder;
pub mod fixture;
pub mod graph;
pub mod ids;
pub mod member;
pub mod member_graph;
pub mod type_def;
pub mod types;

pub use builder::{
    AssemblyOptions, EventDecl, EventHandle, GraphBuilder, GraphError, MethodDecl, PropertyDecl,
    PropertyHandle, TypeDecl,
};
pub use fixture::{FixtureGraph, GraphFixture};
pub use graph::SymbolGraph;
pub use ids::{AssemblyId, MemberId, TypeDefId};
pub use member::{
    AccessorOf, AccessorRole, Accessibility, EventInfo, FieldInfo, Member, MemberData, MemberFlags,
    MemberKind, MethodInfo, MethodKind, NestedTypeInfo, PropertyInfo,
};
pub use member_graph::MemberGraph;
pub use type_def::{AssemblyInfo, TypeDef, TypeKind};
pub use types::{CustomModifier, Modifiers, PrimitiveType, RefKind, SigType, TypeSig};
