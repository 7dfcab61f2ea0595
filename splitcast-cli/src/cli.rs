//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use splitcast_core::grouping::MAX_BATCH_SIZE;
use splitcast_core::planner::DEFAULT_TARGET_SIZE_MB;
use splitcast_core::DEFAULT_OUTPUT_DIR;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Splitcast: split large videos and upload them to Discord",
    long_about = "Splits videos into size-bounded segments via ffmpeg stream copy, \
                  then uploads the parts (and any images) to a Discord channel, \
                  grouping related parts into batched messages."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable detailed logging output")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split videos from an input directory into size-bounded parts
    Split(SplitArgs),

    /// Upload files pending in an output directory
    Upload(UploadArgs),

    /// Split and upload in a single run
    Run(RunArgs),
}

#[derive(Args)]
pub struct SplitArgs {
    /// Input directory containing videos, images, and zip archives
    #[arg(required = true, value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory where split files are placed pending upload
    #[arg(short, long, value_name = "OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Target maximum size of one segment, in MB
    #[arg(long, value_name = "MB", default_value_t = DEFAULT_TARGET_SIZE_MB)]
    pub target_size_mb: f64,
}

#[derive(Args)]
pub struct UploadArgs {
    /// Directory holding files pending upload
    #[arg(value_name = "OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Discord bot token
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Discord channel id receiving the uploads
    #[arg(long, env = "DISCORD_CHANNEL_ID", value_name = "ID")]
    pub channel_id: u64,

    /// Maximum number of files per message
    #[arg(long, value_name = "COUNT", default_value_t = MAX_BATCH_SIZE)]
    pub batch_size: usize,
}

#[derive(Args)]
pub struct RunArgs {
    /// Input directory containing videos, images, and zip archives
    #[arg(required = true, value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory where split files are placed pending upload
    #[arg(short, long, value_name = "OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Target maximum size of one segment, in MB
    #[arg(long, value_name = "MB", default_value_t = DEFAULT_TARGET_SIZE_MB)]
    pub target_size_mb: f64,

    /// Discord bot token
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Discord channel id receiving the uploads
    #[arg(long, env = "DISCORD_CHANNEL_ID", value_name = "ID")]
    pub channel_id: u64,

    /// Maximum number of files per message
    #[arg(long, value_name = "COUNT", default_value_t = MAX_BATCH_SIZE)]
    pub batch_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_parses_with_explicit_flags() {
        let cli = Cli::parse_from([
            "splitcast",
            "run",
            "videos",
            "--output-dir",
            "parts",
            "--target-size-mb",
            "7.5",
            "--token",
            "abc",
            "--channel-id",
            "1234",
        ]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.input_dir, PathBuf::from("videos"));
                assert_eq!(args.output_dir, PathBuf::from("parts"));
                assert_eq!(args.target_size_mb, 7.5);
                assert_eq!(args.channel_id, 1234);
                assert_eq!(args.batch_size, MAX_BATCH_SIZE);
            }
            _ => panic!("expected run subcommand"),
        }
    }

    #[test]
    fn split_needs_no_credentials() {
        let cli = Cli::parse_from(["splitcast", "split", "videos"]);
        match cli.command {
            Commands::Split(args) => {
                assert_eq!(args.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
                assert_eq!(args.target_size_mb, DEFAULT_TARGET_SIZE_MB);
            }
            _ => panic!("expected split subcommand"),
        }
    }
}
