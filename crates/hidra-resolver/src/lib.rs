//! Override and hiding resolution.
//!
//! Given a member declared in a type, the resolver reports which base-type
//! members it overrides, which it hides, which method the runtime's own
//! override resolution would pick, and whether that disagreement calls for an
//! explicit override record.
//!
//! - [`classify`]: which members take part, and how
//! - [`find_in_type`]: one type's worth of candidate matching
//! - [`resolve_class_member`] / [`resolve_interface_member`]: the class chain
//!   and interface lattice walks
//! - [`resolve_accessor`]: accessors, projected from their property or event
//! - [`first_runtime_overridden_method`] / [`explicit_override_record`]:
//!   runtime collision analysis
//! - [`OverrideResolver`]: the memoizing entry point tying these together
//!
//! The resolver reads an immutable [`hidra_symbols::SymbolGraph`] and never
//! fails; ambiguity shows up as multi-element results or flags.

pub mod accessors;
pub mod class_chain;
pub mod classify;
pub mod interface_lattice;
pub mod matcher;
pub mod options;
pub mod resolver;
pub mod result;
pub mod runtime;
pub mod signature;

pub use accessors::{own_or_inherited_accessor, resolve_accessor};
pub use class_chain::resolve_class_member;
pub use classify::{Classification, classify};
pub use interface_lattice::resolve_interface_member;
pub use matcher::{TypeScan, find_in_type};
pub use options::ResolverOptions;
pub use resolver::{CacheStats, OverrideResolver};
pub use result::{ExplicitOverrideRecord, OverriddenOrHiddenResult, RuntimeOverride};
pub use runtime::{explicit_override_record, first_runtime_overridden_method};
pub use signature::{SignatureEquivalencePolicy, identical_return_types};
