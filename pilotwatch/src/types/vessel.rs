use std::fmt;

use serde::Serialize;

/// Trailing annotation the source appends to a vessel name when it emits more
/// than one row for the same movement.
const DUPLICATE_MARKER: &str = "(d)";

/// Canonical identity of a vessel.
///
/// Derived from the raw vessel name by stripping a trailing duplicate marker
/// and surrounding whitespace. Two records with the same key describe the same
/// physical movement. Derivation is total and deterministic; an empty key
/// means "no vessel identity" and must be excluded from grouping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VesselKey(String);

impl VesselKey {
    /// Derives the canonical key from a raw vessel name.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        let stripped = trimmed
            .strip_suffix(DUPLICATE_MARKER)
            .map(str::trim_end)
            .unwrap_or(trimmed);

        VesselKey(stripped.to_string())
    }

    /// Returns whether this key carries no identity.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VesselKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_marker_is_stripped() {
        assert_eq!(
            VesselKey::from_raw("MSC BELGICA (d)"),
            VesselKey::from_raw("MSC BELGICA")
        );
    }

    #[test]
    fn marker_without_space_is_stripped() {
        assert_eq!(VesselKey::from_raw("ALFA(d)"), VesselKey::from_raw("ALFA"));
    }

    #[test]
    fn marker_is_case_sensitive() {
        assert_ne!(VesselKey::from_raw("ALFA (D)"), VesselKey::from_raw("ALFA"));
    }

    #[test]
    fn only_trailing_marker_is_stripped() {
        assert_eq!(
            VesselKey::from_raw("ALFA (d) BRAVO").as_str(),
            "ALFA (d) BRAVO"
        );
    }

    #[test]
    fn whitespace_only_name_yields_empty_key() {
        assert!(VesselKey::from_raw("   ").is_empty());
        assert!(VesselKey::from_raw(" (d) ").is_empty());
    }
}
