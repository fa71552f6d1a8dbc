use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use env_logger::{Target, WriteStyle};
use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use log::{LevelFilter, Log, Metadata, Record};

/// Size at which the log file is rotated.
pub(crate) const LOG_MAX_BYTES: usize = 10_000_000;
/// Number of rotated log files kept next to the active one.
pub(crate) const LOG_BACKUPS: usize = 5;

pub(crate) struct LogSettings {
    pub(crate) verbose: bool,
    pub(crate) logfile: PathBuf,
    pub(crate) max_bytes: usize,
    pub(crate) backups: usize,
}

impl LogSettings {
    pub(crate) fn new(verbose: bool, logfile: PathBuf) -> Self {
        Self {
            verbose,
            logfile,
            max_bytes: LOG_MAX_BYTES,
            backups: LOG_BACKUPS,
        }
    }

    fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

/// Console logger plus an optional rotating file sink.
pub(crate) struct Logger {
    console: env_logger::Logger,
    file: Option<env_logger::Logger>,
}

impl Logger {
    /// Build both sinks. A log file that cannot be opened leaves the logger
    /// console-only and is returned alongside so the caller can report it.
    pub(crate) fn new(settings: &LogSettings) -> (Self, Option<anyhow::Error>) {
        let console = builder(settings.level()).build();

        match open_log_file(&settings.logfile, settings.max_bytes, settings.backups) {
            Ok(sink) => {
                let file = builder(settings.level())
                    .target(Target::Pipe(Box::new(sink)))
                    .write_style(WriteStyle::Never)
                    .build();
                (
                    Self {
                        console,
                        file: Some(file),
                    },
                    None,
                )
            }
            Err(err) => (
                Self {
                    console,
                    file: None,
                },
                Some(err),
            ),
        }
    }

    /// Install as the process logger. Fails only if a logger is already set.
    pub(crate) fn install(self) -> Result<(), log::SetLoggerError> {
        let max_level = self.console.filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

fn builder(level: LevelFilter) -> env_logger::Builder {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .filter(None, level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                buf.timestamp(),
                record.level(),
                record.args()
            )
        });
    log_builder
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console.enabled(metadata)
            || self.file.as_ref().is_some_and(|file| file.enabled(metadata))
    }

    fn log(&self, record: &Record) {
        self.console.log(record);
        if let Some(file) = &self.file {
            file.log(record);
        }
    }

    fn flush(&self) {
        self.console.flush();
        if let Some(file) = &self.file {
            file.flush();
        }
    }
}

/// Open the log file for appending, rolling over to `<name>.1` … `<name>.N`
/// once it grows past `max_bytes`.
pub(crate) fn open_log_file(
    path: &Path,
    max_bytes: usize,
    backups: usize,
) -> anyhow::Result<FileRotate<AppendCount>> {
    // FileRotate swallows open errors, check the path is writable first.
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Opening log file {path:?}"))?;

    Ok(FileRotate::new(
        path,
        AppendCount::new(backups),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    ))
}
