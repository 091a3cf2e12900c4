//! Core engine for relkeep operations
//!
//! - **config**: tool configuration (relkeep.toml) parsing and validation
//! - **error**: error types with contextual help messages and exit codes
//! - **lock**: advisory lock around the record read-modify-write cycle
//! - **sync**: the synchronizer operations (bump, date syncs, bulk rewrite)
//! - **vcs**: read-only commit-history queries (CommitOracle)

pub mod config;
pub mod error;
pub mod lock;
pub mod sync;
pub mod vcs;
