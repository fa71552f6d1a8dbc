use std::path::{Path, PathBuf};

use crate::error::ParserError;
use crate::sensitive::DEFAULT_PATTERNS;
use crate::APP_NAME;

/// Input file used when none is given.
pub(crate) const DEFAULT_INPUT: &str = "discovery.json";
pub(crate) const DEFAULT_LOG_FILE: &str = "ndp.log";

const INPUT_EXTENSION: &str = "json";

const ARG_INPUT: &str = "INPUT";
const ARG_INPUT_FILE: &str = "INPUT-FILE";
const ARG_VERSION: &str = "VERSION";
const ARG_VERBOSE: &str = "VERBOSE";
const ARG_LOGFILE: &str = "LOGFILE";
const ARG_SENSITIVE_PATTERN: &str = "SENSITIVE-PATTERN";

#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub(crate) struct Settings {
    pub(crate) input: PathBuf,
    pub(crate) verbose: bool,
    pub(crate) logfile: PathBuf,
    pub(crate) sensitive_patterns: Vec<String>,
}

pub(crate) fn command() -> clap::Command {
    clap::Command::new(APP_NAME)
        .version(clap::crate_version!())
        .disable_version_flag(true)
        .about(
            "Parse a NetAlly discovery.json file to extract host data \
             and count valid IPv4 addresses",
        )
        .arg(
            clap::Arg::new(ARG_INPUT)
                .conflicts_with(ARG_INPUT_FILE)
                .help("Path to input JSON file (alternative to --input-file)"),
        )
        .arg(
            clap::Arg::new(ARG_INPUT_FILE)
                .long("input-file")
                .alias("input_file")
                .default_value(DEFAULT_INPUT)
                .help("Path to input JSON file"),
        )
        .arg(
            clap::Arg::new(ARG_VERSION)
                .short('v')
                .long("version")
                .action(clap::ArgAction::Version)
                .help("Print version"),
        )
        .arg(
            clap::Arg::new(ARG_VERBOSE)
                .long("verbose")
                .action(clap::ArgAction::SetTrue)
                .help("Enables DEBUG log level"),
        )
        .arg(
            clap::Arg::new(ARG_LOGFILE)
                .long("logfile")
                .default_value(DEFAULT_LOG_FILE)
                .help("Path to the rotating log file"),
        )
        .arg(
            clap::Arg::new(ARG_SENSITIVE_PATTERN)
                .long("sensitive-pattern")
                .action(clap::ArgAction::Append)
                .help(
                    "Regular expression flagging sensitive content; \
                     replaces the built-in api_key/password patterns (repeatable)",
                ),
        )
}

impl Settings {
    pub(crate) fn from_matches(matches: &clap::ArgMatches) -> Self {
        // An explicit positional input wins over the --input-file default.
        let input = matches
            .get_one::<String>(ARG_INPUT)
            .or_else(|| matches.get_one::<String>(ARG_INPUT_FILE))
            .map_or_else(|| PathBuf::from(DEFAULT_INPUT), PathBuf::from);

        let logfile = matches
            .get_one::<String>(ARG_LOGFILE)
            .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);

        let sensitive_patterns: Vec<String> = matches
            .get_many::<String>(ARG_SENSITIVE_PATTERN)
            .map(|values| values.cloned().collect())
            .unwrap_or_else(|| DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect());

        Self {
            input,
            verbose: matches.get_flag(ARG_VERBOSE),
            logfile,
            sensitive_patterns,
        }
    }

    /// Check the input path before any attempt to read it.
    pub(crate) fn validate(&self) -> Result<(), ParserError> {
        validate_input(&self.input)
    }
}

fn validate_input(path: &Path) -> Result<(), ParserError> {
    if !path.is_file() {
        return Err(ParserError::Argument(format!(
            "Input file does not exist: {}",
            path.display()
        )));
    }

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(INPUT_EXTENSION));
    if !is_json {
        return Err(ParserError::Argument(format!(
            "Input file must be a JSON file: {}",
            path.display()
        )));
    }

    Ok(())
}
