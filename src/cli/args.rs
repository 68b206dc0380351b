//! Command-line argument definitions for the unload processor
//!
//! The CLI is a thin consumer of the library: it starts a parse session,
//! polls its status for the progress display, and prints or exports the
//! finished tables.

use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::app::models::RecordFamily;
use crate::config::{FieldFailurePolicy, ParseOptions};

/// CLI arguments for the unload processor
#[derive(Debug, Clone, Parser)]
#[command(
    name = "unload-processor",
    version,
    about = "Convert z/OS unload datasets (IRRDBU00, DCOLLECT) into queryable tables",
    long_about = "Streams a mainframe unload file, decodes every documented record layout \
                  into a typed table, and optionally exports the tables as Parquet files \
                  for downstream analysis."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse an unload file into per-record-type tables
    Parse(ParseArgs),
    /// List the record types a family's registry knows
    Types(TypesArgs),
}

/// Which unload family an input file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FamilyArg {
    /// IRRDBU00 security-database unload
    Security,
    /// DCOLLECT storage-management collection
    Storage,
}

impl From<FamilyArg> for RecordFamily {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::Security => RecordFamily::SecurityUnload,
            FamilyArg::Storage => RecordFamily::StorageCollection,
        }
    }
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Input unload file
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Unload family of the input file
    #[arg(short = 'f', long = "family", value_enum)]
    pub family: FamilyArg,

    /// Restrict decoding to these record types (comma-separated codes or
    /// well-known names, e.g. "0100,USBD"). Other types are still counted.
    #[arg(short = 't', long = "types", value_name = "LIST")]
    pub types: Option<String>,

    /// Export directory for one Parquet file per decoded table
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Filename prefix for exported Parquet files
    #[arg(long = "prefix", value_name = "PREFIX", default_value = "")]
    pub prefix: String,

    /// Drop whole records when any field fails to decode
    #[arg(long = "strict")]
    pub strict: bool,

    /// Print the per-record diagnostics log after the summary
    #[arg(long = "diagnostics")]
    pub diagnostics: bool,

    /// Suppress the progress bar
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl ParseArgs {
    /// Session options derived from the flags
    pub fn parse_options(&self) -> ParseOptions {
        let type_filter: Option<BTreeSet<String>> = self.types.as_ref().map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect()
        });
        ParseOptions {
            type_filter,
            field_failure_policy: if self.strict {
                FieldFailurePolicy::RecordFatal
            } else {
                FieldFailurePolicy::NullAndKeep
            },
            ..ParseOptions::default()
        }
    }
}

/// Arguments for the types command
#[derive(Debug, Clone, Parser)]
pub struct TypesArgs {
    /// Unload family to list
    #[arg(short = 'f', long = "family", value_enum)]
    pub family: FamilyArg,
}
