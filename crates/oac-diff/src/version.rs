//! Loose semantic-version comparison.
//!
//! Document version strings come from hand-written `info.version` fields,
//! so parsing tolerates the common sloppiness: surrounding whitespace,
//! `v`/`V`/`=` prefixes, missing minor or patch components, and leading
//! zeros. Anything that still fails to parse downgrades the comparison to
//! a pass-through of the raw strings with no delta flags set.

use semver::Version;
use serde::{Deserialize, Serialize};

/// The version transition between two documents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionChange {
    /// Raw old version string, echoed verbatim.
    pub old: String,
    /// Raw new version string, echoed verbatim.
    pub new: String,
    pub changed: VersionDelta,
}

/// Which semver component changed. At most one flag is set: the
/// highest-order component that differs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDelta {
    pub major: bool,
    pub minor: bool,
    pub patch: bool,
}

impl VersionDelta {
    /// Returns `true` if any component changed.
    pub fn any(&self) -> bool {
        self.major || self.minor || self.patch
    }
}

/// Compare two version strings under loose semver rules.
///
/// If either side fails to parse, no numeric comparison happens: the raw
/// strings are kept and all delta flags stay false.
pub fn compare(old: &str, new: &str) -> VersionChange {
    let mut change = VersionChange {
        old: old.to_string(),
        new: new.to_string(),
        changed: VersionDelta::default(),
    };
    let (Some(old_version), Some(new_version)) = (parse_loose(old), parse_loose(new)) else {
        return change;
    };
    if old_version.major != new_version.major {
        change.changed.major = true;
    } else if old_version.minor != new_version.minor {
        change.changed.minor = true;
    } else if old_version.patch != new_version.patch || old_version.pre != new_version.pre {
        change.changed.patch = true;
    }
    change
}

/// Normalize a loose version string and parse it as strict semver.
fn parse_loose(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let no_eq = trimmed.strip_prefix('=').unwrap_or(trimmed).trim_start();
    let core_and_rest = no_eq.strip_prefix(['v', 'V']).unwrap_or(no_eq);

    // Split the numeric core from any prerelease/build suffix.
    let core_end = core_and_rest
        .find(['-', '+'])
        .unwrap_or(core_and_rest.len());
    let (core, rest) = core_and_rest.split_at(core_end);

    let mut parts: Vec<u64> = Vec::with_capacity(3);
    for piece in core.split('.') {
        parts.push(piece.parse().ok()?);
    }
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    while parts.len() < 3 {
        parts.push(0);
    }

    let rebuilt = format!("{}.{}.{}{rest}", parts[0], parts[1], parts[2]);
    Version::parse(&rebuilt).ok()
}
