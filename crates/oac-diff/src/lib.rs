//! Diff engine for OAC.
//!
//! Compares two document IRs entity by entity, classifies every observed
//! difference as breaking or non-breaking, and pairs the result with a
//! loose-semver comparison of the two document versions. The output is a
//! serializable change set consumed by the changelog formatter or written
//! straight to JSON.
//!
//! # Key Types
//!
//! - [`Change`] / [`ChangeSet`] -- Classified change records and their two-list container
//! - [`VersionChange`] / [`VersionDelta`] -- Version transition with semver delta flags
//! - [`diff`] / [`compare`] -- The differencer and the version comparator

pub mod changes;
pub mod differ;
pub mod version;

pub use changes::{Change, ChangeSet};
pub use differ::diff;
pub use version::{compare, VersionChange, VersionDelta};
