//! Result values produced by the resolver.

use hidra_symbols::MemberId;

/// The members a member overrides and the members it hides.
///
/// More than one overridden member means the override is ambiguous (typically
/// a generic instantiation that produced duplicate signatures); callers
/// decide whether that is worth a diagnostic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverriddenOrHiddenResult {
    pub overridden_members: Vec<MemberId>,
    pub hidden_members: Vec<MemberId>,
}

impl OverriddenOrHiddenResult {
    pub const EMPTY: Self = Self {
        overridden_members: Vec::new(),
        hidden_members: Vec::new(),
    };

    pub fn new(overridden_members: Vec<MemberId>, hidden_members: Vec<MemberId>) -> Self {
        Self {
            overridden_members,
            hidden_members,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.overridden_members.is_empty() && self.hidden_members.is_empty()
    }

    /// The first overridden member, which is the override target when there
    /// is no ambiguity.
    pub fn overridden_member(&self) -> Option<MemberId> {
        self.overridden_members.first().copied()
    }
}

/// The method the runtime's own override resolution would pick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RuntimeOverride {
    pub method: MemberId,
    /// More than one runtime-equivalent method existed in the base type that
    /// supplied `method`.
    pub was_ambiguous: bool,
}

/// Whether a method needs an explicit override record in metadata.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExplicitOverrideRecord {
    pub required: bool,
    /// Never set unless `required` is.
    pub should_warn_ambiguous: bool,
}

impl ExplicitOverrideRecord {
    pub const NOT_REQUIRED: Self = Self {
        required: false,
        should_warn_ambiguous: false,
    };

    pub const REQUIRED: Self = Self {
        required: true,
        should_warn_ambiguous: false,
    };
}
