use clap::builder::{OsStringValueParser, PathBufValueParser};
use clap::{Arg, ArgAction, Command, value_parser};
use logging::LogLevel;
use settings::TraversalPolicy;

pub(crate) const PROGRAM_NAME: &str = "gcp";

/// Builds the `clap` command used for parsing.
pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Mirror a directory tree, compressing files chunk by chunk.")
        .after_help(concat!(
            "Configuration is read from $GCP_CONFIG, $HOME/.gcp.toml and --config, in that\n",
            "order; command line options override every file. Set GCP_LOG to a tracing\n",
            "filter directive to refine --log.",
        ))
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .short('n')
                .help("Report what would be copied without writing anything.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("concurrency")
                .long("concurrency")
                .short('j')
                .value_name("N")
                .help("Number of files transformed in parallel.")
                .value_parser(value_parser!(usize))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .help("Read an additional configuration file.")
                .value_parser(PathBufValueParser::new())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("key")
                .long("key")
                .value_name("KEY_OR_FILE")
                .help("Encryption key, or a file containing it.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("encrypt")
                .long("encrypt")
                .help("Encrypt every file not excluded from encryption.")
                .action(ArgAction::SetTrue)
                .overrides_with("disable-encryption"),
        )
        .arg(
            Arg::new("disable-encryption")
                .long("disable-encryption")
                .help("Never encrypt, whatever the configuration says.")
                .action(ArgAction::SetTrue)
                .overrides_with("encrypt"),
        )
        .arg(
            Arg::new("disable-compression")
                .long("disable-compression")
                .help("Never compress, whatever the configuration says.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .value_name("LEVEL")
                .help("Log level: critical, error, warning, notice, info, debug or trace.")
                .default_value("info")
                .value_parser(|value: &str| value.parse::<LogLevel>())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("ignore-relative-check")
                .long("ignore-relative-check")
                .help("Allow the source and destination to be nested.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("include")
                .long("include")
                .value_name("PATTERN")
                .help("Copy paths matching PATTERN even when excluded.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .value_name("PATTERN")
                .help("Skip paths matching PATTERN.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("on-traversal-error")
                .long("on-traversal-error")
                .value_name("POLICY")
                .help("What to do when a directory cannot be read: abort or skip.")
                .value_parser(|value: &str| value.parse::<TraversalPolicy>())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("source")
                .value_name("SOURCE")
                .help("Directory to mirror.")
                .required(true)
                .value_parser(OsStringValueParser::new()),
        )
        .arg(
            Arg::new("destination")
                .value_name("DESTINATION")
                .help("Directory receiving the mirror.")
                .required(true)
                .value_parser(OsStringValueParser::new()),
        )
}
