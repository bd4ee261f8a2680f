//! stsrun — STS model runner.

use stsrun_lib::{app, config, errors};

fn main() {
    let config = config::AppConfig::parse();

    // Initialize tracing
    let level = if config.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let code = app::run(&config).unwrap_or_else(|err| {
        stsrun_cli::ui::print_error(&format!("{err:#}"));
        errors::handle_anyhow(&err)
    });
    std::process::exit(code);
}
