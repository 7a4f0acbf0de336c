use std::ffi::OsString;
use std::path::PathBuf;

use logging::LogLevel;
use settings::TraversalPolicy;

use super::command_builder::{PROGRAM_NAME, clap_command};

/// Parsed command line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ParsedArgs {
    pub(crate) source: PathBuf,
    pub(crate) destination: PathBuf,
    pub(crate) dry_run: bool,
    pub(crate) concurrency: Option<usize>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) key: Option<String>,
    /// `Some(true)` for `--encrypt`, `Some(false)` for `--disable-encryption`.
    pub(crate) encrypt: Option<bool>,
    pub(crate) disable_compression: bool,
    pub(crate) log_level: LogLevel,
    pub(crate) ignore_relative_check: bool,
    pub(crate) includes: Vec<String>,
    pub(crate) excludes: Vec<String>,
    pub(crate) traversal_policy: Option<TraversalPolicy>,
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let encrypt = if matches.get_flag("encrypt") {
        Some(true)
    } else if matches.get_flag("disable-encryption") {
        Some(false)
    } else {
        None
    };

    Ok(ParsedArgs {
        source: matches
            .remove_one::<OsString>("source")
            .map(PathBuf::from)
            .unwrap_or_default(),
        destination: matches
            .remove_one::<OsString>("destination")
            .map(PathBuf::from)
            .unwrap_or_default(),
        dry_run: matches.get_flag("dry-run"),
        concurrency: matches.remove_one::<usize>("concurrency"),
        config: matches.remove_one::<PathBuf>("config"),
        key: matches.remove_one::<String>("key"),
        encrypt,
        disable_compression: matches.get_flag("disable-compression"),
        log_level: matches
            .remove_one::<LogLevel>("log")
            .unwrap_or_default(),
        ignore_relative_check: matches.get_flag("ignore-relative-check"),
        includes: matches
            .remove_many::<String>("include")
            .map(Iterator::collect)
            .unwrap_or_default(),
        excludes: matches
            .remove_many::<String>("exclude")
            .map(Iterator::collect)
            .unwrap_or_default(),
        traversal_policy: matches.remove_one::<TraversalPolicy>("on-traversal-error"),
    })
}
