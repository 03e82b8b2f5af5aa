//! Command line interface

use crate::config::Config;
use crate::pipeline::RunOptions;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Default configuration file
pub const DEFAULT_CONFIG: &str = "./myConfig.json";

/// Build the `ctm` command
#[must_use]
pub fn command() -> Command {
    Command::new("ctm")
        .version(crate::VERSION)
        .about("Continuous Traceability Monitor: links automated tests to backlog items")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .default_value(DEFAULT_CONFIG)
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file"),
        )
        .arg(
            Arg::new("delivery-version")
                .long("sd")
                .help("Delivery version"),
        )
        .arg(
            Arg::new("delivery-program")
                .long("sp")
                .help("Delivery program"),
        )
        .arg(
            Arg::new("backlog-items")
                .long("bi")
                .help("Delivery backlog items, e.g. \"GitHub:org/repo#1, Jira:PROJ-2\""),
        )
        .arg(
            Arg::new("delivery-file")
                .long("df")
                .value_parser(value_parser!(PathBuf))
                .help("Delivery file with program, delivery and backlog keys"),
        )
        .arg(
            Arg::new("export-mapping")
                .long("erm")
                .action(ArgAction::SetTrue)
                .help("Export the discovered test-to-backlog mapping"),
        )
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// Configuration file
    pub config: PathBuf,
    /// `--sd`
    pub delivery_version: Option<String>,
    /// `--sp`
    pub delivery_program: Option<String>,
    /// `--bi`
    pub backlog_items: Option<String>,
    /// `--df`
    pub delivery_file: Option<PathBuf>,
    /// `--erm`
    pub export_mapping: bool,
}

impl CliArgs {
    /// Parse the process arguments, exiting on `--help`, `--version` or misuse
    #[must_use]
    pub fn parse() -> Self {
        Self::from_matches(&command().get_matches())
    }

    /// Read arguments from clap matches
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config: matches
                .get_one::<PathBuf>("config")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG)),
            delivery_version: matches.get_one::<String>("delivery-version").cloned(),
            delivery_program: matches.get_one::<String>("delivery-program").cloned(),
            backlog_items: matches.get_one::<String>("backlog-items").cloned(),
            delivery_file: matches.get_one::<PathBuf>("delivery-file").cloned(),
            export_mapping: matches.get_flag("export-mapping"),
        }
    }

    /// Let command line delivery values win over configured ones
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(version) = &self.delivery_version {
            config.delivery.version = version.clone();
        }
        if let Some(program) = &self.delivery_program {
            config.delivery.program = program.clone();
        }
        if let Some(items) = &self.backlog_items {
            config.delivery.backlogitems = items.clone();
        }
    }

    /// Options for the run
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            export_mapping: self.export_mapping,
        }
    }
}
