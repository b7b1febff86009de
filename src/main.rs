use anyhow::Result;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "PG_EXPLORER_LOG";

fn main() -> Result<()> {
    init_logging();
    pg_explorer::cli::commands::run()
}

/// Logs go to stderr so `search --json` output stays parseable
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
