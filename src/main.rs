use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use gsm_decrypt::cli::Cli;
use gsm_decrypt::config::Config;
use gsm_decrypt::decrypt::{check_file, decrypt_file};
use gsm_decrypt::logging;
use gsm_decrypt::secrets::GcpSecretManager;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_cli(cli)?;

    if config.check_only {
        let report = check_file(&config)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let backend = GcpSecretManager::new(&config.backend)?;
    let report = decrypt_file(&config, &backend)
        .await
        .with_context(|| format!("decrypting {}", config.input.display()))?;

    info!("Done: {} value(s) written to {}", report.resolved, report.output.display());
    Ok(())
}
