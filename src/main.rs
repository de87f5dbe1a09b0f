use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `VPSBOOT_LOG=vpsboot=debug`.
const LOG_ENV: &str = "VPSBOOT_LOG";

fn main() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    vpsboot::app::cli::run();
}
