//! # poulint_cache
//!
//! Incremental parse cache for poulint.
//!
//! This crate provides:
//! - [`SourceFile`]: a selected file with its content fingerprint
//! - [`CacheKey`]: (path, fingerprint, parser version), the exact-match
//!   identity of a cached parse result
//! - [`CacheEntry`]: one persisted key/outcome pair
//! - [`ParseCache`]: the `get_or_parse` front door with an in-run memo and
//!   a per-key persisted store
//!
//! Caching is an optimization, never a requirement: every storage failure
//! (unreadable directory, corrupt entry, failed write) degrades to direct
//! parsing with a warning, and a run with caching disabled produces
//! byte-identical outcomes to a cached run.

mod entry;
mod error;
mod key;
mod manager;
mod source_file;

pub use entry::CacheEntry;
pub use error::CacheError;
pub use key::CacheKey;
pub use manager::ParseCache;
pub use source_file::SourceFile;
