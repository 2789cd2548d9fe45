use std::process::ExitCode;

use clap::Parser;
use meterlink_cli::{exit_code, logging, run_report, Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.json_logs);

    let Command::Report(args) = cli.command;
    match run_report(&args).await {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{json}");
                if result.success {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            }
            Err(err) => {
                eprintln!("error: failed to render result: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Usage report failed");
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}
