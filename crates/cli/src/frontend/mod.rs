mod arguments;
mod command_builder;
mod execution;
mod exit_code;
mod signals;

#[cfg(test)]
mod tests;

use std::ffi::OsString;
use std::io::Write;

pub use exit_code::{EXIT_CANCELLED, EXIT_CONFIG, EXIT_OK, EXIT_PARTIAL, exit_code_from};

use arguments::parse_args;

/// Parses `arguments`, runs the mirror and returns the process exit code.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let parsed = match parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => return report_clap_error(&error, stdout, stderr),
    };

    execution::execute(parsed, stdout, stderr)
}

fn report_clap_error<Out: Write, Err: Write>(
    error: &clap::Error,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32 {
    use clap::error::ErrorKind;

    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(stdout, "{error}");
            EXIT_OK
        }
        _ => {
            let _ = write!(stderr, "{error}");
            EXIT_CONFIG
        }
    }
}

