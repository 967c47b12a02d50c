use std::process::ExitCode;

use clap::Parser;
use formkit_cli::{run, Cli};
use formkit_core::logging::setup_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match cli.load_settings() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("error[{}]: {err}", err.code());
            return ExitCode::FAILURE;
        }
    };
    setup_logging(&settings);
    tracing::debug!(?settings, "settings loaded");

    match run(&cli, &settings).await {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "formkit failed");
            eprintln!("error[{}]: {err}", err.code());
            ExitCode::FAILURE
        }
    }
}
