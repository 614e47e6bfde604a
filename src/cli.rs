//! CLI argument parsing module for colbind
//!
//! This module handles parsing command-line arguments using the clap crate.
//! Each table operation is a subcommand working on CSV files; the result is
//! written to stdout as CSV.
//!
//! Key features of the CLI:
//! - `rbind` / `cbind` over any number of input files
//! - `arrange` with `col`, `-col` or `desc(col)` ordering keys
//! - Optional grouping before `arrange` and `distinct`
//! - Diagnostic output control via the --verbose flag

use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::Result;
use clap::{Parser, Subcommand};
use regex::Regex;

use crate::error::{ColbindError, ColbindResult};
use crate::table::SortDirection;

/// Command-line arguments for colbind
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Bind, order and deduplicate CSV tables with type unification"
)]
pub struct ColbindArgs {
    /// Operation to run
    #[clap(subcommand)]
    pub command: Command,

    /// Specify field separator character
    ///
    /// Applies to every input file and to the output. Defaults to a comma.
    /// Examples: -F: for colon-separated files, -F\\t for tab-separated files.
    #[clap(short = 'F', global = true, help = "Field separator character")]
    pub field_separator: Option<String>,

    /// Columns to load as factors - may be repeated
    ///
    /// Factor columns keep a sorted level set, order by level and unify
    /// with other factors by level union when row-bound.
    #[clap(long = "factor", global = true, help = "Load the named column as a factor")]
    pub factor: Vec<String>,

    /// Enable verbose diagnostic output
    #[clap(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Table operations
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stack files by rows, unifying column types
    Rbind {
        /// Input files, in binding order
        #[clap(required = true)]
        files: Vec<PathBuf>,
    },

    /// Place files side by side; all must have the same row count
    Cbind {
        /// Input files, in binding order
        #[clap(required = true)]
        files: Vec<PathBuf>,
    },

    /// Sort rows by one or more keys
    ///
    /// With no keys and at least one --group-by column, groups are reordered
    /// by their grouping values instead.
    Arrange {
        /// Input file
        file: PathBuf,

        /// Ordering key: `col`, `-col` or `desc(col)` for descending
        #[clap(short, long = "key", allow_hyphen_values = true)]
        keys: Vec<String>,

        /// Group rows by the named column first
        #[clap(short, long = "group-by")]
        group_by: Vec<String>,
    },

    /// Keep the first occurrence of each distinct row
    Distinct {
        /// Input file
        file: PathBuf,

        /// Group rows by the named column first
        #[clap(short, long = "group-by")]
        group_by: Vec<String>,
    },
}

impl Command {
    /// Grouping columns requested by the subcommand
    pub fn group_by(&self) -> &[String] {
        match self {
            Command::Arrange { group_by, .. } | Command::Distinct { group_by, .. } => group_by,
            Command::Rbind { .. } | Command::Cbind { .. } => &[],
        }
    }
}

/// Parse an ordering key specification
///
/// Accepted forms are `col` (ascending), `-col` and `desc(col)` (descending).
pub fn parse_key_spec(spec: &str) -> ColbindResult<(String, SortDirection)> {
    static KEY_SPEC_RE: OnceLock<Regex> = OnceLock::new();
    let pattern = KEY_SPEC_RE.get_or_init(|| {
        Regex::new(r"^(?:desc\((?P<desc>[^()]+)\)|-(?P<neg>.+)|(?P<asc>[^-].*))$")
            .expect("valid key pattern")
    });

    let captures = pattern
        .captures(spec.trim())
        .ok_or_else(|| ColbindError::InvalidKeySpec(spec.to_string()))?;

    if let Some(name) = captures.name("desc").or_else(|| captures.name("neg")) {
        Ok((name.as_str().trim().to_string(), SortDirection::Descending))
    } else if let Some(name) = captures.name("asc") {
        Ok((name.as_str().to_string(), SortDirection::Ascending))
    } else {
        Err(ColbindError::InvalidKeySpec(spec.to_string()))
    }
}

/// Parse command-line arguments into the ColbindArgs structure
pub fn parse_args() -> Result<ColbindArgs> {
    Ok(ColbindArgs::parse())
}
