//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Splits videos from an input directory into size-bounded parts.
pub mod split;

/// Uploads files pending in an output directory.
pub mod upload;
