//! Changelog formatter for OAC.
//!
//! Turns a classified change set into ordered, wrapped, indented text:
//! breaking changes first, then the rest, grouped by owning operation.
//! Detailed mode nests old/new values and inline markdown diffs of
//! description text under each headline.
//!
//! # Key Types
//!
//! - [`format`] / [`FormatOptions`] -- The renderer and its knobs
//! - [`Template`] -- Overridable headings, bullets, and indentation
//! - [`inline_diff`] -- `**insert**`/`~~delete~~` description diffs
//! - [`wrap`] -- Whitespace-aware line wrapping

pub mod error;
pub mod format;
pub mod inline;
pub mod template;
pub mod wrap;

pub use error::{ChangelogError, ChangelogResult};
pub use format::{format, FormatOptions};
pub use inline::inline_diff;
pub use template::Template;
pub use wrap::wrap;
