//! Secret Manager resource addressing.

use std::fmt;

/// Resource name of one secret version, e.g.
/// `projects/my-project/secrets/db_password/versions/3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalAddress(String);

impl CanonicalAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the resource name for a reference's segments.
///
/// Plain interpolation: segments are expected to have passed
/// [`validate_reference`](super::reference::validate_reference) already.
pub fn canonicalize(owner: &str, name: &str, version: &str) -> CanonicalAddress {
    CanonicalAddress(format!(
        "projects/{owner}/secrets/{name}/versions/{version}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_segments() {
        assert_eq!(
            canonicalize("proj", "name", "3").as_str(),
            "projects/proj/secrets/name/versions/3"
        );
    }

    #[test]
    fn deterministic() {
        let a = canonicalize("my-project", "api_key", "latest");
        let b = canonicalize("my-project", "api_key", "latest");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "projects/my-project/secrets/api_key/versions/latest");
    }
}
