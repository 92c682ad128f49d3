use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr so `--check` output on
/// stdout stays machine-readable. `GSM_DECRYPT_LOG_FORMAT=json` switches to
/// JSON lines.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gsm_decrypt=info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if std::env::var("GSM_DECRYPT_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}
