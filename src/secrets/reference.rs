//! `gsm:` reference grammar.
//!
//! A reference looks like `gsm:<project>/<secret>/<version>`. Any string with
//! the `gsm:` prefix must match the grammar exactly; a prefixed value that
//! does not is a fatal configuration error, never a literal.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::canonical::{canonicalize, CanonicalAddress};

/// Prefix that marks a string scalar as a secret reference.
pub const REFERENCE_PREFIX: &str = "gsm:";

/// Full reference grammar, applied to the text after the prefix.
pub const REFERENCE_PATTERN: &str =
    r"^[a-z][a-z0-9-]{4,28}[a-z0-9]/[A-Za-z0-9_-]+/(latest|[1-9][0-9]*)$";

/// Worked example included in every diagnostic.
pub const REFERENCE_EXAMPLE: &str = "gsm:project-id/secret_name/1";

static REFERENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(REFERENCE_PATTERN).expect("reference pattern is valid"));
static OWNER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9-]{4,28}[a-z0-9]$").expect("owner pattern is valid"));
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("name pattern is valid"));
static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(latest|[1-9][0-9]*)$").expect("version pattern is valid"));

/// Returns true if `value` carries the reserved prefix.
pub fn is_reference_candidate(value: &str) -> bool {
    value.starts_with(REFERENCE_PREFIX)
}

/// Which part of a candidate failed the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceFault {
    /// The value does not start with `gsm:`.
    MissingPrefix,
    /// The remainder does not split into exactly three `/`-separated segments.
    SegmentCount { found: usize },
    /// The project segment is malformed.
    Owner,
    /// The secret name segment is malformed.
    SecretName,
    /// The version segment is neither `latest` nor a positive integer.
    Version,
}

impl fmt::Display for ReferenceFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceFault::MissingPrefix => {
                write!(f, "missing '{REFERENCE_PREFIX}' prefix")
            }
            ReferenceFault::SegmentCount { found } => {
                write!(f, "expected 3 '/'-separated segments, found {found}")
            }
            ReferenceFault::Owner => f.write_str("invalid project_id"),
            ReferenceFault::SecretName => f.write_str("invalid secret_name"),
            ReferenceFault::Version => f.write_str("invalid version"),
        }
    }
}

/// A value that failed the reference grammar.
///
/// `Display` renders the full diagnostic: the fault, the expected form with
/// per-segment rules, a worked example and the exact pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidReference {
    pub value: String,
    pub fault: ReferenceFault,
}

impl fmt::Display for InvalidReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Secret '{}' did not match required format ({}).",
            self.value, self.fault
        )?;
        writeln!(f)?;
        writeln!(f, "Must be in the form 'gsm:project_id/secret_name/version'.")?;
        writeln!(
            f,
            "project_id: 6 to 30 lowercase letters, digits, or hyphens. \
             It must start with a letter. Trailing hyphens are prohibited."
        )?;
        writeln!(
            f,
            "secret_name: English letters (A-Z, a-z), numbers (0-9), \
             dashes (-), and underscores (_)."
        )?;
        writeln!(
            f,
            "version: 'latest', or a positive integer without leading zeros (versions start at 1)."
        )?;
        writeln!(f)?;
        writeln!(f, "example: '{REFERENCE_EXAMPLE}'")?;
        write!(f, "regex: '^{REFERENCE_PREFIX}{}'", &REFERENCE_PATTERN[1..])
    }
}

impl std::error::Error for InvalidReference {}

/// The three path segments of a validated reference, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceParts<'a> {
    pub owner: &'a str,
    pub name: &'a str,
    pub version: &'a str,
}

/// Check `value` against the reference grammar.
///
/// Pure predicate: `Ok` carries the split segments, `Err` names the first
/// segment that failed.
pub fn validate_reference(value: &str) -> Result<ReferenceParts<'_>, InvalidReference> {
    let invalid = |fault| InvalidReference {
        value: value.to_string(),
        fault,
    };

    let body = value
        .strip_prefix(REFERENCE_PREFIX)
        .ok_or_else(|| invalid(ReferenceFault::MissingPrefix))?;

    let segments: Vec<&str> = body.split('/').collect();
    let [owner, name, version] = segments[..] else {
        return Err(invalid(ReferenceFault::SegmentCount {
            found: segments.len(),
        }));
    };

    if !OWNER_RE.is_match(owner) {
        return Err(invalid(ReferenceFault::Owner));
    }
    if !NAME_RE.is_match(name) {
        return Err(invalid(ReferenceFault::SecretName));
    }
    if !VERSION_RE.is_match(version) {
        return Err(invalid(ReferenceFault::Version));
    }

    // Segment checks agree with the full pattern.
    debug_assert!(REFERENCE_RE.is_match(body));

    Ok(ReferenceParts {
        owner,
        name,
        version,
    })
}

/// A malformed reference found in a document, with where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed secret reference at '{config_path}': {invalid}")]
pub struct ReferenceError {
    pub config_path: String,
    pub invalid: InvalidReference,
}

/// A validated secret reference found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretRef {
    /// Project that owns the secret.
    pub owner: String,
    /// Secret name within the project.
    pub name: String,
    /// `latest` or a positive version number.
    pub version: String,
    /// The config path where this ref was found (dotted notation).
    pub config_path: String,
    /// The original string.
    pub raw: String,
}

impl SecretRef {
    /// Parse a scalar string found at `config_path`.
    ///
    /// Returns `Ok(None)` when the string is not a reference candidate at all.
    pub fn parse(raw: &str, config_path: &str) -> Result<Option<Self>, ReferenceError> {
        if !is_reference_candidate(raw) {
            return Ok(None);
        }

        let parts = validate_reference(raw).map_err(|invalid| ReferenceError {
            config_path: config_path.to_string(),
            invalid,
        })?;

        Ok(Some(Self {
            owner: parts.owner.to_string(),
            name: parts.name.to_string(),
            version: parts.version.to_string(),
            config_path: config_path.to_string(),
            raw: raw.to_string(),
        }))
    }

    /// Backend address for this reference.
    pub fn canonical_address(&self) -> CanonicalAddress {
        canonicalize(&self.owner, &self.name, &self.version)
    }
}
