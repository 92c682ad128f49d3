/// Default configuration constants used across the system.

/// Default input document.
pub const DEFAULT_SECRETS_FILE: &str = "secrets.yaml";

/// Suffix appended to the input path to form the output path.
pub const OUTPUT_SUFFIX: &str = ".dec";

/// Secret Manager REST base URL.
pub const DEFAULT_ENDPOINT: &str = "https://secretmanager.googleapis.com/v1";

/// Default per-request HTTP timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Maximum size for an input document (10 MB).
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;
