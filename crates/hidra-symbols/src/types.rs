//! Signature-level type representation.
//!
//! Types here are only as rich as override matching needs: structural
//! equality of parameter and return types, positional generic parameters, and
//! the custom modifiers that the runtime treats as part of a signature.

use crate::ids::TypeDefId;
use smallvec::SmallVec;
use std::fmt;

/// Built-in types that are not declared in the graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Bool,
    Char,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    IntPtr,
    UIntPtr,
    String,
    Object,
}

impl PrimitiveType {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "bool" => Self::Bool,
            "char" => Self::Char,
            "int8" => Self::I8,
            "uint8" => Self::U8,
            "int16" => Self::I16,
            "uint16" => Self::U16,
            "int32" => Self::I32,
            "uint32" => Self::U32,
            "int64" => Self::I64,
            "uint64" => Self::U64,
            "float32" => Self::F32,
            "float64" => Self::F64,
            "native int" => Self::IntPtr,
            "native uint" => Self::UIntPtr,
            "string" => Self::String,
            "object" => Self::Object,
            _ => return None,
        })
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "int8",
            Self::U8 => "uint8",
            Self::I16 => "int16",
            Self::U16 => "uint16",
            Self::I32 => "int32",
            Self::U32 => "uint32",
            Self::I64 => "int64",
            Self::U64 => "uint64",
            Self::F32 => "float32",
            Self::F64 => "float64",
            Self::IntPtr => "native int",
            Self::UIntPtr => "native uint",
            Self::String => "string",
            Self::Object => "object",
        }
    }
}

/// A type as it appears in a member signature.
///
/// Named types always refer to the generic *definition* plus type arguments,
/// so two signatures mentioning `List<int32>` compare equal no matter which
/// constructed type record they came from.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum TypeSig {
    Void,
    Primitive(PrimitiveType),
    Named { def: TypeDefId, args: Vec<TypeSig> },
    /// Type parameter of the containing generic type, by position (`!n`).
    TypeParam(u32),
    /// Type parameter of the generic method, by position (`!!n`).
    MethodTypeParam(u32),
    Array { element: Box<TypeSig>, rank: u32 },
    Pointer(Box<TypeSig>),
}

impl TypeSig {
    pub const I32: Self = Self::Primitive(PrimitiveType::I32);
    pub const I64: Self = Self::Primitive(PrimitiveType::I64);
    pub const STRING: Self = Self::Primitive(PrimitiveType::String);
    pub const OBJECT: Self = Self::Primitive(PrimitiveType::Object);
    pub const BOOL: Self = Self::Primitive(PrimitiveType::Bool);

    pub const fn named(def: TypeDefId) -> Self {
        Self::Named {
            def,
            args: Vec::new(),
        }
    }

    pub fn generic(def: TypeDefId, args: Vec<TypeSig>) -> Self {
        Self::Named { def, args }
    }

    pub fn array(element: TypeSig) -> Self {
        Self::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    /// Replace class type parameters (`!n`) with `args[n]`.
    ///
    /// Method type parameters are left alone: they are bound per call, not by
    /// constructing the containing type.
    pub fn substitute(&self, args: &[TypeSig]) -> TypeSig {
        match self {
            Self::TypeParam(idx) => args
                .get(*idx as usize)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Self::Named { def, args: inner } => Self::Named {
                def: *def,
                args: inner.iter().map(|a| a.substitute(args)).collect(),
            },
            Self::Array { element, rank } => Self::Array {
                element: Box::new(element.substitute(args)),
                rank: *rank,
            },
            Self::Pointer(inner) => Self::Pointer(Box::new(inner.substitute(args))),
            Self::Void | Self::Primitive(_) | Self::MethodTypeParam(_) => self.clone(),
        }
    }

    /// Replace method type parameters (`!!n`) with `args[n]`.
    pub fn substitute_method(&self, args: &[TypeSig]) -> TypeSig {
        match self {
            Self::MethodTypeParam(idx) => args
                .get(*idx as usize)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Self::Named { def, args: inner } => Self::Named {
                def: *def,
                args: inner.iter().map(|a| a.substitute_method(args)).collect(),
            },
            Self::Array { element, rank } => Self::Array {
                element: Box::new(element.substitute_method(args)),
                rank: *rank,
            },
            Self::Pointer(inner) => Self::Pointer(Box::new(inner.substitute_method(args))),
            Self::Void | Self::Primitive(_) | Self::TypeParam(_) => self.clone(),
        }
    }

    pub fn mentions_type_params(&self) -> bool {
        match self {
            Self::TypeParam(_) => true,
            Self::Named { args, .. } => args.iter().any(TypeSig::mentions_type_params),
            Self::Array { element, .. } => element.mentions_type_params(),
            Self::Pointer(inner) => inner.mentions_type_params(),
            Self::Void | Self::Primitive(_) | Self::MethodTypeParam(_) => false,
        }
    }
}

impl fmt::Debug for TypeSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Primitive(p) => write!(f, "{}", p.keyword()),
            Self::Named { def, args } if args.is_empty() => write!(f, "{def:?}"),
            Self::Named { def, args } => write!(f, "{def:?}{args:?}"),
            Self::TypeParam(idx) => write!(f, "!{idx}"),
            Self::MethodTypeParam(idx) => write!(f, "!!{idx}"),
            Self::Array { element, rank } if *rank <= 1 => write!(f, "{element:?}[]"),
            Self::Array { element, rank } => write!(f, "{element:?}[{}]", ",".repeat(*rank as usize - 1)),
            Self::Pointer(inner) => write!(f, "{inner:?}*"),
        }
    }
}

/// How a parameter or return value is passed.
///
/// For return values `In` stands for a read-only reference return.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RefKind {
    #[default]
    None,
    Ref,
    Out,
    In,
}

impl RefKind {
    /// The runtime only distinguishes by-value from by-reference.
    pub const fn is_by_ref(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// An opaque metadata annotation on a type usage (`modreq` / `modopt`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CustomModifier {
    pub modifier: TypeDefId,
    pub is_optional: bool,
}

impl CustomModifier {
    pub const fn required(modifier: TypeDefId) -> Self {
        Self {
            modifier,
            is_optional: false,
        }
    }

    pub const fn optional(modifier: TypeDefId) -> Self {
        Self {
            modifier,
            is_optional: true,
        }
    }
}

pub type Modifiers = SmallVec<[CustomModifier; 2]>;

/// A type usage in a signature: the type, how it is passed, and its modifiers.
///
/// Used for parameters, method return values, and property/event types.
/// `ref_modifiers` precede the by-ref marker, `type_modifiers` follow it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SigType {
    pub ty: TypeSig,
    pub ref_kind: RefKind,
    pub ref_modifiers: Modifiers,
    pub type_modifiers: Modifiers,
}

impl SigType {
    pub fn new(ty: TypeSig) -> Self {
        Self {
            ty,
            ref_kind: RefKind::None,
            ref_modifiers: Modifiers::new(),
            type_modifiers: Modifiers::new(),
        }
    }

    pub fn void() -> Self {
        Self::new(TypeSig::Void)
    }

    pub fn by_ref(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }

    pub fn with_modifier(mut self, modifier: CustomModifier) -> Self {
        self.type_modifiers.push(modifier);
        self
    }

    pub fn with_ref_modifier(mut self, modifier: CustomModifier) -> Self {
        self.ref_modifiers.push(modifier);
        self
    }

    pub fn custom_modifier_count(&self) -> usize {
        self.ref_modifiers.len() + self.type_modifiers.len()
    }

    pub fn has_custom_modifiers(&self) -> bool {
        self.custom_modifier_count() > 0
    }

    /// Same type and ref-kind, modifiers included.
    pub fn same_modifiers(&self, other: &SigType) -> bool {
        self.ref_modifiers == other.ref_modifiers && self.type_modifiers == other.type_modifiers
    }

    pub fn substitute(&self, args: &[TypeSig]) -> SigType {
        Self {
            ty: self.ty.substitute(args),
            ref_kind: self.ref_kind,
            ref_modifiers: self.ref_modifiers.clone(),
            type_modifiers: self.type_modifiers.clone(),
        }
    }

    pub fn substitute_method(&self, args: &[TypeSig]) -> SigType {
        Self {
            ty: self.ty.substitute_method(args),
            ref_kind: self.ref_kind,
            ref_modifiers: self.ref_modifiers.clone(),
            type_modifiers: self.type_modifiers.clone(),
        }
    }
}

impl From<TypeSig> for SigType {
    fn from(ty: TypeSig) -> Self {
        Self::new(ty)
    }
}
