//! Ad Locator Library
//!
//! This library keeps an in-memory map from hierarchical locations
//! (`/ru/svrd/revda`) to advertising platforms, and answers which platforms
//! are visible at a location: those registered there and at every ancestor.
//!
//! # Architecture
//!
//! - [`data_structures::LocationTrie`]: arena-backed path trie with parent links
//! - [`store::LocationStore`]: normalization, atomic bulk reload, ancestor search
//! - [`protocol`]: line-oriented stdio adapter over the store
//! - [`config`] and [`error`]: ambient configuration and error reporting

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;
pub mod protocol;
pub mod store;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use store::LocationStore;

/// Version information for the Ad Locator.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

