//! Secret reference resolution.
//!
//! Pipeline for one scalar: validate the `gsm:` reference, canonicalize it
//! into a Secret Manager resource name, fetch the bytes through a
//! [`SecretResolver`], encode them and write them back into the tree.

pub mod canonical;
pub mod encoding;
pub mod gcp_provider;
pub mod reference;
pub mod types;
pub mod walker;

pub use canonical::{canonicalize, CanonicalAddress};
pub use encoding::OutputEncoding;
pub use gcp_provider::GcpSecretManager;
pub use reference::{
    is_reference_candidate, validate_reference, InvalidReference, ReferenceError, ReferenceFault,
    SecretRef,
};
pub use types::{DecryptOptions, ResolveError, SecretResolver};
pub use walker::{collect_references, TreeWalker, WalkSummary};
