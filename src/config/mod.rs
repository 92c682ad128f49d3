mod defaults;

pub use defaults::*;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::document::{output_path, same_target};
use crate::error::{Error, Result};
use crate::secrets::{DecryptOptions, OutputEncoding};

/// Settings for one run, resolved from the command line and environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Document to decrypt.
    pub input: PathBuf,
    /// Where the decrypted document is written.
    pub output: PathBuf,
    /// Validate and list references only; never contact the backend.
    pub check_only: bool,
    pub options: DecryptOptions,
    pub backend: BackendConfig,
}

/// Secret Manager connection settings.
#[derive(Clone)]
pub struct BackendConfig {
    pub endpoint: String,
    pub access_token: Option<String>,
    pub timeout: Duration,
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("endpoint", &self.endpoint)
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Build the run configuration from parsed arguments.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        if cli.timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "--timeout-secs must be greater than 0".to_string(),
            ));
        }

        if cli.endpoint.trim().is_empty() {
            return Err(Error::InvalidConfig("--endpoint must not be empty".to_string()));
        }

        let access_token = cli
            .access_token
            .filter(|token| !token.trim().is_empty());

        let output = cli
            .output
            .unwrap_or_else(|| output_path(&cli.secrets_file));

        if same_target(&output, &cli.secrets_file) {
            return Err(Error::InvalidConfig(format!(
                "output path '{}' must differ from the input path",
                output.display()
            )));
        }

        Ok(Self {
            input: cli.secrets_file,
            output,
            check_only: cli.check,
            options: DecryptOptions {
                encoding: OutputEncoding::from_flag(cli.encode),
            },
            backend: BackendConfig {
                endpoint: cli.endpoint,
                access_token,
                timeout: Duration::from_secs(cli.timeout_secs),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    fn cli() -> Cli {
        Cli {
            secrets_file: PathBuf::from(DEFAULT_SECRETS_FILE),
            encode: false,
            output: None,
            check: false,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    fn declared_default(id: &str) -> String {
        let cmd = Cli::command();
        let arg = cmd.get_arguments().find(|a| a.get_id() == id).unwrap();
        arg.get_default_values()[0].to_string_lossy().into_owned()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_declares_defaults() {
        assert_eq!(declared_default("secrets_file"), "secrets.yaml");
        assert_eq!(declared_default("endpoint"), DEFAULT_ENDPOINT);
        assert_eq!(declared_default("timeout_secs"), DEFAULT_TIMEOUT_SECS.to_string());
    }

    #[test]
    fn camel_case_alias_and_short_encode() {
        let parsed = Cli::try_parse_from([
            "gsm-decrypt",
            "--secretsFile",
            "app.yaml",
            "-e",
            "--output",
            "app.yaml.plain",
        ])
        .unwrap();

        assert_eq!(parsed.secrets_file, PathBuf::from("app.yaml"));
        assert!(parsed.encode);
        assert_eq!(parsed.output, Some(PathBuf::from("app.yaml.plain")));
    }

    #[test]
    fn defaults() {
        let config = Config::from_cli(cli()).unwrap();

        assert_eq!(config.input, PathBuf::from("secrets.yaml"));
        assert_eq!(config.output, PathBuf::from("secrets.yaml.dec"));
        assert_eq!(config.options.encoding, OutputEncoding::Text);
        assert!(!config.check_only);
        assert_eq!(config.backend.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.backend.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn encode_flag_selects_base64() {
        let config = Config::from_cli(Cli {
            secrets_file: "app.yaml".into(),
            encode: true,
            ..cli()
        })
        .unwrap();

        assert_eq!(config.options.encoding, OutputEncoding::Base64);
        assert_eq!(config.output, PathBuf::from("app.yaml.dec"));
    }

    #[test]
    fn explicit_output_wins() {
        let config = Config::from_cli(Cli {
            secrets_file: "app.yaml".into(),
            output: Some("plain.yaml".into()),
            ..cli()
        })
        .unwrap();
        assert_eq!(config.output, PathBuf::from("plain.yaml"));
    }

    #[test]
    fn rejects_output_equal_to_input() {
        let err = Config::from_cli(Cli {
            secrets_file: "app.yaml".into(),
            output: Some("app.yaml".into()),
            ..cli()
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn rejects_output_spelled_differently_from_input() {
        let cwd = std::env::current_dir().unwrap();
        let aliases = [
            PathBuf::from("./secrets.yaml"),
            cwd.join("secrets.yaml"),
            PathBuf::from("src/../secrets.yaml"),
        ];

        for output in aliases {
            let err = Config::from_cli(Cli {
                secrets_file: "secrets.yaml".into(),
                output: Some(output.clone()),
                ..cli()
            })
            .unwrap_err();
            assert!(
                matches!(err, Error::InvalidConfig(_)),
                "{} was accepted",
                output.display()
            );
        }
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = Config::from_cli(Cli {
            timeout_secs: 0,
            ..cli()
        })
        .unwrap_err();
        assert!(err.to_string().contains("--timeout-secs"));
    }

    #[test]
    fn blank_token_is_ignored() {
        let config = Config::from_cli(Cli {
            access_token: Some("  ".into()),
            ..cli()
        })
        .unwrap();
        assert!(config.backend.access_token.is_none());
    }

    #[test]
    fn debug_hides_token() {
        let backend = BackendConfig {
            access_token: Some("ya29.secret".into()),
            ..BackendConfig::default()
        };
        let rendered = format!("{backend:?}");
        assert!(!rendered.contains("ya29.secret"));
        assert!(rendered.contains("***"));
    }
}
