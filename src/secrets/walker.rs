//! Document tree walker.
//!
//! Walks a YAML tree depth-first, resolves every `gsm:` string through a
//! [`SecretResolver`] and replaces it in place. Mappings, sequences and all
//! other scalars keep their shape and order.

use futures::future::{BoxFuture, FutureExt};
use serde_yaml::Value;
use tracing::{debug, info, warn};

use super::reference::{ReferenceError, SecretRef};
use super::types::{DecryptOptions, SecretResolver};
use crate::error::{Error, Result};

/// Outcome of a successful walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    /// Number of scalars replaced. Duplicates count once per occurrence.
    pub resolved: usize,
}

/// Resolves references in a document tree, one at a time.
///
/// Every reference is fetched independently; nothing is cached between
/// occurrences of the same reference.
pub struct TreeWalker<'a> {
    resolver: &'a dyn SecretResolver,
    options: &'a DecryptOptions,
}

impl<'a> TreeWalker<'a> {
    pub fn new(resolver: &'a dyn SecretResolver, options: &'a DecryptOptions) -> Self {
        Self { resolver, options }
    }

    /// Resolve every reference under `root` in place.
    ///
    /// Stops at the first malformed reference or resolution failure; the
    /// tree may then be partially rewritten and must be discarded.
    pub async fn walk(&self, root: &mut Value) -> Result<WalkSummary> {
        let resolved = self.visit(root, String::new()).await?;
        info!(
            "Resolved {resolved} secret reference(s) via provider '{}'",
            self.resolver.name()
        );
        Ok(WalkSummary { resolved })
    }

    fn visit<'b>(&'b self, node: &'b mut Value, path: String) -> BoxFuture<'b, Result<usize>> {
        async move {
            match node {
                Value::Mapping(map) => {
                    let mut resolved = 0;
                    for (key, child) in map.iter_mut() {
                        resolved += self.visit(child, child_path(&path, key)).await?;
                    }
                    Ok(resolved)
                }
                Value::Sequence(items) => {
                    let mut resolved = 0;
                    for (idx, child) in items.iter_mut().enumerate() {
                        resolved += self.visit(child, format!("{path}[{idx}]")).await?;
                    }
                    Ok(resolved)
                }
                Value::Tagged(tagged) => self.visit(&mut tagged.value, path).await,
                Value::String(s) => match SecretRef::parse(s, &path)? {
                    Some(secret) => {
                        *s = self.resolve(&secret).await?;
                        Ok(1)
                    }
                    None => Ok(0),
                },
                Value::Null | Value::Bool(_) | Value::Number(_) => Ok(0),
            }
        }
        .boxed()
    }

    async fn resolve(&self, secret: &SecretRef) -> Result<String> {
        let address = secret.canonical_address();
        debug!(
            "Resolving '{}' at '{}' via provider '{}'",
            address,
            secret.config_path,
            self.resolver.name()
        );

        let bytes = self
            .resolver
            .access(&address)
            .await
            .map_err(|source| Error::Resolution {
                config_path: secret.config_path.clone(),
                address: address.to_string(),
                source,
            })?;

        let encoding = self.options.encoding;
        if !encoding.is_lossless(&bytes) {
            warn!(
                "Secret at '{}' is not valid UTF-8; invalid bytes were replaced \
                 (use --encode to preserve them)",
                secret.config_path
            );
        }

        Ok(encoding.encode(&bytes))
    }
}

/// List every reference in `root` in traversal order without resolving.
///
/// Fails on the first malformed reference, so a document can be rejected
/// before any backend call is made.
pub fn collect_references(root: &Value) -> std::result::Result<Vec<SecretRef>, ReferenceError> {
    let mut refs = Vec::new();
    collect_recursive(root, "", &mut refs)?;
    Ok(refs)
}

fn collect_recursive(
    value: &Value,
    path: &str,
    refs: &mut Vec<SecretRef>,
) -> std::result::Result<(), ReferenceError> {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                collect_recursive(child, &child_path(path, key), refs)?;
            }
        }
        Value::Sequence(items) => {
            for (idx, child) in items.iter().enumerate() {
                collect_recursive(child, &format!("{path}[{idx}]"), refs)?;
            }
        }
        Value::Tagged(tagged) => collect_recursive(&tagged.value, path, refs)?,
        Value::String(s) => {
            if let Some(secret) = SecretRef::parse(s, path)? {
                refs.push(secret);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
    Ok(())
}

/// Dotted path of a mapping child. Keys are only used for display.
fn child_path(parent: &str, key: &Value) -> String {
    let label = match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "~".to_string(),
        _ => "?".to_string(),
    };

    if parent.is_empty() {
        label
    } else {
        format!("{parent}.{label}")
    }
}
