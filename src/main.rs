mod cli;
mod config;
mod project;
mod tools;
mod utils;

use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_env("PROJGEN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    cli::run();
}
