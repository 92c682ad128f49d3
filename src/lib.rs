//! Resolve `gsm:` secret references in YAML documents.
//!
//! A document such as
//!
//! ```yaml
//! database:
//!   password: gsm:my-project/db_password/latest
//! ```
//!
//! is walked depth-first; every `gsm:<project>/<secret>/<version>` string is
//! fetched from Google Cloud Secret Manager and replaced by its value, and the
//! result is written next to the input as `<file>.dec`.

pub mod cli;
pub mod config;
pub mod decrypt;
pub mod document;
pub mod error;
pub mod logging;
pub mod secrets;

pub use error::{Error, Result};
