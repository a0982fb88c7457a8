//! The memoizing override resolver.
//!
//! `OverrideResolver` is the entry point callers use. It classifies a member,
//! dispatches to the class-chain or interface-lattice walker (or, for
//! accessors, to the accessor delegator) and caches each result by member id.
//! The graph is immutable for the resolver's lifetime, so cached results never
//! go stale.

use crate::accessors::resolve_accessor;
use crate::class_chain::resolve_class_member;
use crate::classify::{Classification, classify};
use crate::interface_lattice::resolve_interface_member;
use crate::options::ResolverOptions;
use crate::result::{ExplicitOverrideRecord, OverriddenOrHiddenResult, RuntimeOverride};
use crate::runtime::{explicit_override_record, first_runtime_overridden_method};
use dashmap::DashMap;
use hidra_symbols::{Member, MemberId, MemberKind, SymbolGraph};
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Level, span, trace};

/// Cache hit and miss counts at one point in time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Resolves override and hiding relationships over one symbol graph.
///
/// Safe to share across threads. Two threads resolving the same member may
/// both compute it; they store equal values, so either write is fine.
///
/// ## Usage
///
/// ```
/// use hidra_resolver::OverrideResolver;
/// use hidra_symbols::{AssemblyOptions, GraphBuilder, MemberFlags, MethodDecl, TypeDecl};
///
/// let mut builder = GraphBuilder::new();
/// let app = builder.add_assembly("App", AssemblyOptions::source());
/// let base = builder.add_type(app, TypeDecl::class("Base"));
/// let base_m = builder.add_method(base, MethodDecl::new("M").flags(MemberFlags::VIRTUAL));
/// let derived = builder.add_type(app, TypeDecl::class("Derived").base(base));
/// let derived_m = builder.add_method(derived, MethodDecl::new("M").flags(MemberFlags::OVERRIDE));
/// let graph = builder.finish()?;
///
/// let resolver = OverrideResolver::new(&graph);
/// assert_eq!(resolver.resolve(derived_m).overridden_members, vec![base_m]);
/// # Ok::<(), hidra_symbols::GraphError>(())
/// ```
pub struct OverrideResolver<'g> {
    graph: &'g dyn SymbolGraph,
    options: ResolverOptions,
    cache: DashMap<MemberId, Arc<OverriddenOrHiddenResult>, FxBuildHasher>,
    counters: Counters,
}

impl<'g> OverrideResolver<'g> {
    pub fn new(graph: &'g dyn SymbolGraph) -> Self {
        Self::with_options(graph, ResolverOptions::default())
    }

    pub fn with_options(graph: &'g dyn SymbolGraph, options: ResolverOptions) -> Self {
        Self {
            graph,
            options,
            cache: DashMap::with_hasher(FxBuildHasher),
            counters: Counters::default(),
        }
    }

    pub const fn graph(&self) -> &'g dyn SymbolGraph {
        self.graph
    }

    pub const fn options(&self) -> ResolverOptions {
        self.options
    }

    /// The members `id` overrides and the members it hides.
    ///
    /// Members that take no part in overriding (constructors, operators,
    /// explicit interface implementations, generic method instantiations)
    /// resolve to an empty result.
    pub fn resolve(&self, id: MemberId) -> Arc<OverriddenOrHiddenResult> {
        if self.options.memoize {
            if let Some(cached) = self.cache.get(&id) {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                return Arc::clone(&cached);
            }
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
        }

        let _span = span!(Level::TRACE, "resolve", member = %id).entered();
        let result = Arc::new(self.compute(id));
        trace!(
            overridden = ?result.overridden_members,
            hidden = ?result.hidden_members,
            "resolved"
        );
        if self.options.memoize {
            self.cache.insert(id, Arc::clone(&result));
        }
        result
    }

    fn compute(&self, id: MemberId) -> OverriddenOrHiddenResult {
        let graph = self.graph;
        let member = graph.member(id);
        match classify(member) {
            Classification::NotEligible => OverriddenOrHiddenResult::EMPTY,
            Classification::Accessor(link) => {
                let owner = self.resolve(link.associated);
                resolve_accessor(graph, member, link, &owner, &|owner_id| {
                    self.overridden_member(owner_id)
                })
            }
            Classification::Eligible | Classification::NameOnly => {
                if graph.type_def(member.containing_type).is_interface() {
                    resolve_interface_member(graph, member)
                } else {
                    resolve_class_member(graph, member, self.override_hint(member))
                }
            }
        }
    }

    /// A recorded covariant-override target. Properties borrow their
    /// getter's hint.
    fn override_hint(&self, member: &Member) -> Option<MemberId> {
        match member.kind() {
            MemberKind::Method => self.graph.known_override_hint(member.id),
            MemberKind::Property => {
                let getter = member.as_property()?.getter?;
                let hinted = self.graph.known_override_hint(getter)?;
                self.graph.member(hinted).accessor_of().map(|link| link.associated)
            }
            MemberKind::Event | MemberKind::Field | MemberKind::NamedType => None,
        }
    }

    /// The first member `id` hides, if any.
    pub fn first_hidden_member_if_any(&self, id: MemberId) -> Option<MemberId> {
        self.resolve(id).hidden_members.first().copied()
    }

    /// The member `id` overrides. With more than one candidate this is the
    /// first.
    pub fn overridden_member(&self, id: MemberId) -> Option<MemberId> {
        self.resolve(id).overridden_member()
    }

    /// The method the runtime would treat `method` as overriding, walking
    /// only metadata-virtual methods with runtime signature rules.
    pub fn runtime_overridden_method(&self, method: MemberId) -> Option<RuntimeOverride> {
        let _span = span!(Level::TRACE, "runtime_overridden_method", method = %method).entered();
        first_runtime_overridden_method(self.graph, self.graph.member(method))
    }

    /// Whether `method` needs an explicit override record, and whether the
    /// ambiguity behind it deserves a warning.
    pub fn requires_explicit_override_record(&self, method: MemberId) -> ExplicitOverrideRecord {
        let _span =
            span!(Level::TRACE, "requires_explicit_override_record", method = %method).entered();
        let member = self.graph.member(method);
        if member.kind() != MemberKind::Method || !member.is_override() {
            return ExplicitOverrideRecord::NOT_REQUIRED;
        }
        let language = self.overridden_member(method);
        let runtime = first_runtime_overridden_method(self.graph, member);
        explicit_override_record(
            self.graph,
            member,
            language,
            runtime,
            self.options.report_ambiguous_runtime_overrides,
        )
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
        }
    }

    /// Number of cached results.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod tests;
