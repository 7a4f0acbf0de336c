use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use engine::Pipeline;
use settings::{ConfigError, ConfigSources, EncryptionKey, Settings, SettingsBuilder};
use tracing::warn;

use super::arguments::ParsedArgs;
use super::command_builder::PROGRAM_NAME;
use super::exit_code::{EXIT_CANCELLED, EXIT_CONFIG, EXIT_OK, EXIT_PARTIAL};
use super::signals::InterruptGuard;

/// Builds the settings for `parsed`, runs the pipeline and reports the
/// outcome.
pub(crate) fn execute<Out: Write, Err: Write>(
    parsed: ParsedArgs,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32 {
    // Already installed when `run` is called more than once in a process.
    let _ = logging::init_tracing(parsed.log_level);

    let settings = match build_settings(parsed) {
        Ok(settings) => settings,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            return EXIT_CONFIG;
        }
    };

    let cancel = Arc::new(AtomicBool::new(false));
    let _interrupts = match InterruptGuard::install(&cancel) {
        Ok(guard) => Some(guard),
        Err(error) => {
            warn!("failed to install SIGINT handler: {error}");
            None
        }
    };

    let result = Pipeline::new(settings)
        .with_cancellation(Arc::clone(&cancel))
        .run();
    let cancelled = cancel.load(Ordering::SeqCst);

    match result {
        Ok(summary) => {
            let _ = writeln!(stdout, "{summary}");
            if cancelled {
                let _ = writeln!(stderr, "{PROGRAM_NAME}: interrupted");
                EXIT_CANCELLED
            } else if summary.has_failures() {
                let _ = writeln!(
                    stderr,
                    "{PROGRAM_NAME}: {} file(s) could not be copied",
                    summary.failed
                );
                EXIT_PARTIAL
            } else {
                EXIT_OK
            }
        }
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            if cancelled { EXIT_CANCELLED } else { EXIT_CONFIG }
        }
    }
}

/// Layers configuration files and command line values.
fn build_settings(parsed: ParsedArgs) -> Result<Settings, ConfigError> {
    let file = ConfigSources::from_env(parsed.config).load()?;

    let mut builder = SettingsBuilder::new(parsed.source, parsed.destination)
        .apply_file(&file)
        .extend_include(parsed.includes)
        .extend_exclude(parsed.excludes)
        .dry_run(parsed.dry_run)
        .ignore_relative_check(parsed.ignore_relative_check);

    if let Some(concurrency) = parsed.concurrency {
        builder = builder.concurrency(concurrency);
    }
    if parsed.disable_compression {
        builder = builder.compress(false);
    }
    if let Some(encrypt) = parsed.encrypt {
        builder = builder.encrypt(encrypt);
    }
    if let Some(key) = parsed.key.as_deref() {
        builder = builder.key(EncryptionKey::resolve(key)?);
    }
    if let Some(policy) = parsed.traversal_policy {
        builder = builder.traversal_policy(policy);
    }

    builder.build()
}
