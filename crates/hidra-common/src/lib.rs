//! Common types and utilities for the hidra override resolver.
//!
//! This crate provides foundational types used across all hidra crates:
//! - String interning (`Atom`, `Interner`) for member and type names

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner};
