//! Resolver configuration.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverOptions {
    /// Cache each member's result for the lifetime of the resolver.
    pub memoize: bool,
    /// When false, `should_warn_ambiguous` is always false. Whether an
    /// explicit override record is required is unaffected.
    pub report_ambiguous_runtime_overrides: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            memoize: true,
            report_ambiguous_runtime_overrides: true,
        }
    }
}

impl ResolverOptions {
    /// Read options from a JSON object, such as a graph fixture's `options`.
    /// Missing fields keep their defaults.
    pub fn from_json(value: Option<&serde_json::Value>) -> serde_json::Result<Self> {
        match value {
            Some(value) => Self::deserialize(value),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
