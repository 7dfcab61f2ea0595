//! Splitcast command-line interface.
//!
//! Responsibilities:
//! - Parsing command-line arguments (`clap`) and `.env` configuration
//! - Initializing logging (`env_logger`, honoring RUST_LOG)
//! - Dispatching to the split/upload pipeline in splitcast-core
//! - Rendering a run summary and managing the process exit code
//!
//! Per-file and per-batch failures inside a run are logged by the core and
//! leave the exit code at 0; only failures that prevent the run from
//! starting at all (missing ffmpeg/ffprobe, bad paths, bad credentials)
//! exit non-zero.

mod cli;
mod commands;
mod error;

use clap::Parser;
use cli::{Cli, Commands, RunArgs, SplitArgs, UploadArgs};
use error::CliResult;
use log::error;
use owo_colors::OwoColorize;
use splitcast_core::pipeline::{SplitSummary, UploadSummary};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    // Token and channel id may come from a .env file next to the binary.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let start = Instant::now();
    let result = dispatch(cli.command).await;

    match result {
        Ok(()) => {
            println!(
                "{} {}",
                "Total run time:".bold(),
                splitcast_core::format_duration(start.elapsed().as_secs_f64())
            );
        }
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }
}

async fn dispatch(command: Commands) -> CliResult<()> {
    match command {
        Commands::Split(args) => {
            let summary = commands::split::execute(&args)?;
            print_split_summary(&summary);
            Ok(())
        }
        Commands::Upload(args) => {
            let UploadArgs {
                output_dir,
                token,
                channel_id,
                batch_size,
            } = args;
            let summary =
                commands::upload::execute(&output_dir, &token, channel_id, batch_size).await?;
            print_upload_summary(&summary);
            Ok(())
        }
        Commands::Run(args) => {
            let RunArgs {
                input_dir,
                output_dir,
                target_size_mb,
                token,
                channel_id,
                batch_size,
            } = args;

            let split_args = SplitArgs {
                input_dir,
                output_dir: output_dir.clone(),
                target_size_mb,
            };
            let split_summary = commands::split::execute(&split_args)?;
            print_split_summary(&split_summary);

            let upload_summary =
                commands::upload::execute(&output_dir, &token, channel_id, batch_size).await?;
            print_upload_summary(&upload_summary);
            Ok(())
        }
    }
}

fn print_split_summary(summary: &SplitSummary) {
    println!();
    println!("{}", "Split summary".bold().underline());
    println!(
        "  {} {}",
        "Videos processed:".bold(),
        summary.outcomes.len().green()
    );
    println!(
        "  {} {}",
        "Parts created:   ".bold(),
        summary.parts_created().green()
    );
    println!(
        "  {} {}",
        "Images copied:   ".bold(),
        summary.images_copied.green()
    );
    if summary.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:    ".bold(),
            summary.files_failed.red()
        );
    }
}

fn print_upload_summary(summary: &UploadSummary) {
    println!();
    println!("{}", "Upload summary".bold().underline());
    println!(
        "  {} {}",
        "Batches sent:    ".bold(),
        summary.batches_sent.green()
    );
    println!(
        "  {} {}",
        "Files delivered: ".bold(),
        summary.files_delivered.green()
    );
    if summary.batches_failed > 0 {
        println!(
            "  {} {}",
            "Batches failed:  ".bold(),
            summary.batches_failed.red()
        );
    }
}
