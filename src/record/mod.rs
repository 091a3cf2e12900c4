//! The persisted release record: codec, typed view, transformations
//!
//! # Core Invariants
//!
//! 1. **Version bumps are monotonic**
//!    - One component increments, everything of lower significance resets to 0
//!    - The triple strictly increases in major.minor.patch order
//!
//! 2. **The build number tracks the commit count**
//!    - Set to the reachable-commit count on every bump when git is queryable
//!    - Left unchanged on a failed lookup, never decreased as a side effect
//!
//! 3. **Date syncs converge idempotently**
//!    - A sync whose target equals the stored date is a no-op with no write
//!
//! 4. **Milestone history is append-only**
//!    - A bump appends exactly one entry after the last existing one
//!    - Entries are never deduplicated or rewritten (except by the explicit
//!      bulk date rewrite, which is destructive and labeled as such)
//!
//! # Architecture
//!
//! - **codec**: lossless TOML round-trip; typed accessors over one document
//!   node per field, everything else preserved byte-for-byte
//! - **store**: pure record transformations plus a changed-fields-only
//!   persist, computed fully in memory before the single disk write

pub mod codec;
pub mod store;

pub use codec::RecordFile;
pub use store::{BumpLevel, Milestone, ReleaseRecord};
