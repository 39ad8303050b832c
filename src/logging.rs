use std::io::IsTerminal;
use tracing::Level;

use crate::CliArgs;

/// Environment variable holding an `EnvFilter` expression just for this tool.
const LOG_ENV_VAR: &str = "CAKE_ACTION_LOG";

/// Set by the runner when step debug logging is enabled for a workflow run.
const RUNNER_DEBUG_ENV_VAR: &str = "RUNNER_DEBUG";

/// Initialize tracing/logging based on the parsed CLI args.
///
/// Progress lines are what an action step shows its user, so INFO is visible by default.
///
/// # Verbosity levels
///
/// - `0`: INFO, compact format without timestamps (the runner timestamps every line)
/// - `1`: DEBUG, full format with timestamp and target. Also selected when `RUNNER_DEBUG=1`.
/// - `2+`: TRACE, full format
///
/// # Environment variable support
///
/// Log filtering can be controlled via environment variables in priority order:
/// 1. `CAKE_ACTION_LOG`
/// 2. `RUST_LOG`
/// 3. The level derived from the verbosity, as above
///
/// # Panics
///
/// Panics if called more than once in the same process, as the global tracing subscriber can
/// only be initialized once.
pub(crate) fn init(args: &CliArgs) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let runner_debug = std::env::var(RUNNER_DEBUG_ENV_VAR).is_ok_and(|v| v == "1");
    let level = level_for(args.verbose, runner_debug);
    let use_simple_format = level == Level::INFO;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_ascii_lowercase()));

    let use_ansi = std::io::stderr().is_terminal();

    if use_simple_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_level(false)
                    .with_ansi(use_ansi)
                    .without_time(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(use_ansi),
            )
            .init();
    }
}

fn level_for(verbose: u8, runner_debug: bool) -> Level {
    match verbose {
        0 if runner_debug => Level::DEBUG,
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialize tracing for tests.
///
/// Output goes through the test writer, so it only shows up for failing tests unless
/// `--nocapture` is used. Defaults to DEBUG; `CAKE_ACTION_LOG` or `RUST_LOG` override it.
/// Safe to call from every test.
#[cfg(test)]
pub(crate) fn init_test_logging() {
    use std::sync::OnceLock;
    use tracing_subscriber::{EnvFilter, fmt};

    static INIT: OnceLock<()> = OnceLock::new();

    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("debug"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_level(true)
            .init();
    });
}
