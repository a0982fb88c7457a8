//! Handles into the member graph.
//!
//! The resolver never holds references into the graph across queries; it
//! passes these copyable ids around and asks the graph for the records.

use std::fmt;

/// Identifies a member (method, property, event, field, nested type).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(pub u32);

/// Identifies a type definition or a constructed generic instantiation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDefId(pub u32);

/// Identifies an assembly (a unit of compilation / metadata).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssemblyId(pub u32);

macro_rules! id_impls {
    ($($ty:ident => $prefix:literal),* $(,)?) => {
        $(
            impl $ty {
                pub const fn index(self) -> usize {
                    self.0 as usize
                }
            }

            impl fmt::Debug for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!($prefix, "#{}"), self.0)
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

id_impls! {
    MemberId => "member",
    TypeDefId => "type",
    AssemblyId => "assembly",
}
