use clap::Parser;
use flowdeck_shell::{cli::Args, config::ShellConfig, run};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let args = Args::parse();
    let config = match ShellConfig::load(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("flowdeck: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Loaded configuration");

    match run::run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(report) => {
            tracing::error!(error = %report, "Run failed");
            ExitCode::FAILURE
        }
    }
}
