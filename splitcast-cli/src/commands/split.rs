//! Implementation of the 'split' subcommand.
//!
//! Wires the CLI arguments into a core configuration and delegates to the
//! pipeline's split stage with the real ffmpeg/ffprobe executors.

use crate::cli::SplitArgs;
use crate::error::{CliErrorContext, CliResult};

use splitcast_core::external::{CrateFfprobeExecutor, SidecarSpawner, StdFsMetadataProvider};
use splitcast_core::pipeline::{self, SplitSummary};
use splitcast_core::{CoreConfig, CoreError};

use log::warn;

/// Builds the core configuration from split arguments.
pub fn build_config(args: &SplitArgs) -> CliResult<CoreConfig> {
    let input_dir = args
        .input_dir
        .canonicalize()
        .cli_with_context(|| format!("Invalid input path '{}'", args.input_dir.display()))?;

    Ok(CoreConfig {
        input_dir,
        output_dir: args.output_dir.clone(),
        target_size_mb: args.target_size_mb,
        ..CoreConfig::default()
    })
}

/// Runs the split stage over the input directory.
///
/// An input directory without processable files is reported as a warning,
/// not an error: the run still exits successfully with an empty summary.
pub fn execute(args: &SplitArgs) -> CliResult<SplitSummary> {
    let config = build_config(args)?;

    match pipeline::split_directory(
        &SidecarSpawner,
        &CrateFfprobeExecutor::new(),
        &StdFsMetadataProvider,
        &config,
    ) {
        Ok(summary) => Ok(summary),
        Err(CoreError::NoFilesFound) => {
            warn!(
                "No processable files found in {}",
                config.input_dir.display()
            );
            Ok(SplitSummary::default())
        }
        Err(e) => Err(e),
    }
}
