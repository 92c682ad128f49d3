use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_ENDPOINT, DEFAULT_SECRETS_FILE, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "gsm-decrypt",
    version,
    about = "Resolve gsm: secret references in a YAML document"
)]
pub struct Cli {
    /// Filepath to a YAML file with secret references
    #[arg(
        short = 'f',
        long = "secrets-file",
        alias = "secretsFile",
        env = "GSM_DECRYPT_FILE",
        default_value = DEFAULT_SECRETS_FILE
    )]
    pub secrets_file: PathBuf,

    /// Base64-encode resolved values instead of writing them as text
    #[arg(short, long, env = "GSM_DECRYPT_ENCODE")]
    pub encode: bool,

    /// Output path [default: <secrets-file>.dec]
    #[arg(short, long, env = "GSM_DECRYPT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Validate references and print them as JSON without resolving
    #[arg(long)]
    pub check: bool,

    /// Secret Manager REST endpoint
    #[arg(long, env = "GSM_DECRYPT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// OAuth bearer token for Secret Manager
    #[arg(long, env = "GOOGLE_OAUTH_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Per-request HTTP timeout in seconds
    #[arg(long, env = "GSM_DECRYPT_HTTP_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}
