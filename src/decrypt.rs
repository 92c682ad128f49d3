//! Run entry points: decrypt a file, or check it without resolving.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::document::{read_document, render_document, same_target, write_document};
use crate::error::{Error, Result};
use crate::secrets::{collect_references, SecretRef, SecretResolver, TreeWalker};

/// What a successful decryption produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptReport {
    pub output: PathBuf,
    pub resolved: usize,
}

/// References found by [`check_file`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub file: PathBuf,
    pub references: Vec<CheckedReference>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckedReference {
    pub config_path: String,
    pub address: String,
}

impl From<&SecretRef> for CheckedReference {
    fn from(secret: &SecretRef) -> Self {
        Self {
            config_path: secret.config_path.clone(),
            address: secret.canonical_address().to_string(),
        }
    }
}

/// Resolve every reference in `config.input` and write `config.output`.
///
/// The whole document is validated before the first backend call, and the
/// output is only written once every reference has resolved.
pub async fn decrypt_file(config: &Config, resolver: &dyn SecretResolver) -> Result<DecryptReport> {
    if same_target(&config.output, &config.input) {
        return Err(Error::InvalidConfig(format!(
            "output path '{}' resolves to the input document",
            config.output.display()
        )));
    }

    let mut doc = read_document(&config.input)?;

    let refs = collect_references(&doc)?;
    info!(
        "Found {} secret reference(s) in {}",
        refs.len(),
        config.input.display()
    );

    let summary = TreeWalker::new(resolver, &config.options)
        .walk(&mut doc)
        .await?;

    let rendered = render_document(&doc)?;
    info!("Writing plaintext secrets to {}", config.output.display());
    write_document(&config.output, &rendered)?;

    Ok(DecryptReport {
        output: config.output.clone(),
        resolved: summary.resolved,
    })
}

/// Validate every reference in `config.input` without contacting the backend.
pub fn check_file(config: &Config) -> Result<CheckReport> {
    let doc = read_document(&config.input)?;
    let refs = collect_references(&doc)?;
    info!(
        "{} secret reference(s) in {} are well-formed",
        refs.len(),
        config.input.display()
    );

    Ok(CheckReport {
        file: config.input.clone(),
        references: refs.iter().map(CheckedReference::from).collect(),
    })
}
