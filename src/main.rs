use std::future::Future;
use std::io::Write;

use log::{error, info, warn};
use tokio::runtime::Runtime;
use tokio::sync::oneshot;

use args::Settings;
use error::{ParserError, EXIT_OK};
use logging::{LogSettings, Logger};
use pipeline::run;
use sensitive::PatternPolicy;

mod args;
mod discovery;
mod error;
mod inventory;
mod logging;
mod pipeline;
mod sensitive;
mod types;

const APP_NAME: &str = "ndp";

fn main() {
    let matches = args::command().get_matches();
    let settings = Settings::from_matches(&matches);

    setup_logger(&settings);
    std::panic::set_hook(Box::new(|panic| error!("Unexpected error: {panic}")));

    let code = match execute(settings) {
        Ok(..) => EXIT_OK,
        Err(err) => report(&err),
    };

    log::logger().flush();
    std::process::exit(code)
}

fn execute(settings: Settings) -> Result<usize, ParserError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| ParserError::Unexpected(format!("Starting runtime: {err}")))?;

    // Listen before any work so an early Ctrl+C also exits cleanly.
    let interrupted = listen_for_interrupt(&runtime);

    settings.validate()?;

    let policy = PatternPolicy::new(settings.sensitive_patterns.as_slice())
        .map_err(|err| ParserError::Argument(format!("Invalid sensitive pattern: {err}")))?;

    run_until_interrupted(
        runtime,
        move || {
            let mut out = std::io::stdout().lock();
            run(&settings, &policy, &mut out)
        },
        interrupted,
    )
}

/// Install the Ctrl+C handler and return a receiver completed on interrupt.
fn listen_for_interrupt(runtime: &Runtime) -> oneshot::Receiver<()> {
    let (tx, rx) = oneshot::channel();
    let _ = runtime.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(());
        }
    });
    // Let the listener task register the handler.
    runtime.block_on(tokio::task::yield_now());

    rx
}

/// Run the blocking `job`, giving up with [`ParserError::Interrupted`] as
/// soon as `interrupt` resolves to `Ok`. An `Err` from `interrupt` is ignored.
fn run_until_interrupted<T, F, I, E>(
    runtime: Runtime,
    job: F,
    interrupt: I,
) -> Result<T, ParserError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ParserError> + Send + 'static,
    I: Future<Output = Result<(), E>>,
{
    let result = runtime.block_on(async move {
        let task = tokio::task::spawn_blocking(job);

        tokio::select! {
            joined = task => joined.map_err(|err| ParserError::Unexpected(err.to_string()))?,
            Ok(()) = interrupt => Err(ParserError::Interrupted),
        }
    });

    // Don't wait for an interrupted job to drain.
    runtime.shutdown_background();

    result
}

/// Log `err`, tell the user about it and pick the exit code.
fn report(err: &ParserError) -> i32 {
    match err {
        ParserError::Interrupted => info!("{err}"),
        ParserError::Argument(msg) => {
            error!("Invalid arguments: {msg}");
            args::command()
                .error(clap::error::ErrorKind::ValueValidation, msg)
                .exit()
        }
        ParserError::SensitiveData { rule, .. } => {
            error!("Aborted due to potential sensitive data (rule: {rule})");
            let _ = writeln!(
                std::io::stdout(),
                "Error: Potential sensitive data detected in input file"
            );
        }
        ParserError::Unexpected(..) => {
            error!("{err}");
            let _ = writeln!(std::io::stdout(), "{err}");
        }
        _ => {
            error!("{err}");
            let _ = writeln!(std::io::stdout(), "Error: {err}");
        }
    }

    err.exit_code()
}

fn setup_logger(settings: &Settings) {
    let (logger, file_err) =
        Logger::new(&LogSettings::new(settings.verbose, settings.logfile.clone()));

    if let Err(err) = logger.install() {
        eprintln!("Logging unavailable: {err}");
        return;
    }

    if let Some(err) = file_err {
        warn!("Logging to console only: {err:#}");
    }
}
