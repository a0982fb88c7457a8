//! Decides whether, and how, a member takes part in override/hide resolution.

use hidra_symbols::{AccessorOf, Member, MemberData, MethodKind};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Matched by signature against same-named members of base types.
    Eligible,
    /// Fields and nested types: the first same-named member of the same kind
    /// (and, for types, the same arity) is the match.
    NameOnly,
    /// Property and event accessors are resolved through their owner.
    Accessor(AccessorOf),
    NotEligible,
}

impl Classification {
    pub const fn is_eligible(self) -> bool {
        !matches!(self, Self::NotEligible)
    }
}

/// Classify `member`.
///
/// # Panics
///
/// If an accessor-kind method has no associated property or event, or the
/// association disagrees with its method kind. Both mean the symbol graph is
/// malformed.
pub fn classify(member: &Member) -> Classification {
    if member.is_explicit_interface_impl() {
        return Classification::NotEligible;
    }
    match &member.data {
        MemberData::Field(_) | MemberData::NamedType(_) => Classification::NameOnly,
        MemberData::Property(_) | MemberData::Event(_) => Classification::Eligible,
        MemberData::Method(method) => {
            // Instantiations resolve through their generic definition.
            if method.constructed_from.is_some() {
                return Classification::NotEligible;
            }
            match method.method_kind {
                MethodKind::Ordinary | MethodKind::DelegateInvoke => Classification::Eligible,
                MethodKind::Constructor
                | MethodKind::StaticConstructor
                | MethodKind::Destructor
                | MethodKind::Operator
                | MethodKind::Conversion
                | MethodKind::ExplicitInterfaceImplementation => Classification::NotEligible,
                MethodKind::PropertyGet
                | MethodKind::PropertySet
                | MethodKind::EventAdd
                | MethodKind::EventRemove => match method.accessor_of {
                    Some(link) if link.role.method_kind() == method.method_kind => {
                        Classification::Accessor(link)
                    }
                    Some(link) => panic!(
                        "unsupported accessor: {:?} is a {:?} but is linked as {:?}",
                        member.id, method.method_kind, link.role
                    ),
                    None => panic!(
                        "unsupported accessor: {:?} has no associated property or event",
                        member.id
                    ),
                },
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/classify_tests.rs"]
mod tests;
