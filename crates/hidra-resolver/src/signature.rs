//! Signature equivalence relations.
//!
//! Override matching uses several related relations. The language's own
//! relation ignores custom modifiers and return types; the runtime's includes
//! both but cannot tell `ref` from `out`. Each relation is a
//! [`SignatureEquivalencePolicy`] value passed to [`SignatureEquivalencePolicy::equivalent`].
//!
//! | Policy                     | name | return type | custom modifiers | ref kinds      | static |
//! |----------------------------|------|-------------|------------------|----------------|--------|
//! | `ExactCustomModifierMatch` | yes  | no          | yes              | exact          | yes    |
//! | `LanguageOverrideMatch`    | yes  | no          | no               | exact          | yes    |
//! | `RuntimeSignatureMatch`    | yes  | yes         | yes              | by-ref or not  | yes    |
//! | `RuntimePlusRefOutMatch`   | yes  | yes         | yes              | exact          | yes    |
//! | `AccessorOverrideMatch`    | no   | no          | no               | exact          | no     |
//!
//! Generic arity and parameter count are always compared.

use hidra_symbols::{Member, SigType};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SignatureEquivalencePolicy {
    ExactCustomModifierMatch,
    LanguageOverrideMatch,
    RuntimeSignatureMatch,
    RuntimePlusRefOutMatch,
    AccessorOverrideMatch,
}

impl SignatureEquivalencePolicy {
    /// The policy for an exact match, given where the member comes from.
    pub const fn exact(from_source: bool) -> Self {
        if from_source {
            Self::ExactCustomModifierMatch
        } else {
            Self::RuntimePlusRefOutMatch
        }
    }

    /// The policy for an inexact (fallback) match.
    pub const fn fallback(from_source: bool) -> Self {
        if from_source {
            Self::LanguageOverrideMatch
        } else {
            Self::RuntimeSignatureMatch
        }
    }

    /// The policy accessors of an overridden property or event must satisfy.
    pub const fn accessor(from_source: bool) -> Self {
        if from_source {
            Self::AccessorOverrideMatch
        } else {
            Self::RuntimeSignatureMatch
        }
    }

    const fn considers_name(self) -> bool {
        !matches!(self, Self::AccessorOverrideMatch)
    }

    const fn considers_return_type(self) -> bool {
        matches!(self, Self::RuntimeSignatureMatch | Self::RuntimePlusRefOutMatch)
    }

    const fn considers_custom_modifiers(self) -> bool {
        matches!(
            self,
            Self::ExactCustomModifierMatch | Self::RuntimeSignatureMatch | Self::RuntimePlusRefOutMatch
        )
    }

    const fn considers_ref_kind_differences(self) -> bool {
        !matches!(self, Self::RuntimeSignatureMatch)
    }

    const fn considers_calling_convention(self) -> bool {
        !matches!(self, Self::AccessorOverrideMatch)
    }

    /// Whether `a` and `b` have equivalent signatures under this policy.
    ///
    /// Members of different kinds are never equivalent.
    pub fn equivalent(self, a: &Member, b: &Member) -> bool {
        if a.kind() != b.kind() {
            return false;
        }
        if self.considers_name() && a.name != b.name {
            return false;
        }
        if a.arity() != b.arity() {
            return false;
        }
        if self.considers_calling_convention() && a.is_static() != b.is_static() {
            return false;
        }

        let (pa, pb) = (a.params(), b.params());
        if pa.len() != pb.len() {
            return false;
        }
        if !pa.iter().zip(pb).all(|(x, y)| self.same_sig_type(x, y)) {
            return false;
        }

        if self.considers_return_type() {
            match (a.return_type(), b.return_type()) {
                (Some(x), Some(y)) => self.same_sig_type(x, y),
                (None, None) => true,
                _ => false,
            }
        } else {
            true
        }
    }

    fn same_sig_type(self, a: &SigType, b: &SigType) -> bool {
        if a.ty != b.ty {
            return false;
        }
        let same_ref = if self.considers_ref_kind_differences() {
            a.ref_kind == b.ref_kind
        } else {
            a.ref_kind.is_by_ref() == b.ref_kind.is_by_ref()
        };
        same_ref && (!self.considers_custom_modifiers() || a.same_modifiers(b))
    }
}

/// Whether two return types (or property/event types) are identical in
/// every respect: type, ref kind and custom modifiers.
pub fn identical_return_types(a: &Member, b: &Member) -> bool {
    match (a.return_type(), b.return_type()) {
        (Some(x), Some(y)) => x == y,
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
#[path = "../tests/signature_tests.rs"]
mod tests;
