//! Logging setup: `env_logger` on stderr, optionally mirrored to a session file.
//!
//! The session file is **truncated at each launch**, so it only ever contains
//! output from the most recent run. `RUST_LOG` still overrides the level picked
//! from `-v` flags.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use env_logger::{Builder, Target};
use log::LevelFilter;

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Returns the path to the current session log file, if one was opened.
pub fn log_path() -> Option<&'static PathBuf> {
    LOG_PATH.get()
}

/// Map repeated `-v` flags to a level filter.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Writes every record to stderr and to the session file.
struct SessionSink {
    file: File,
}

impl Write for SessionSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // A broken log file must never take down the run
        let _ = self.file.write_all(buf);
        io::stderr().write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let _ = self.file.flush();
        io::stderr().flush()
    }
}

fn open_session_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}

/// Initialise logging. Safe to call more than once; later calls are no-ops.
///
/// * Opens (or truncates) `log_file` when given and mirrors output to it.
/// * Installs a panic hook that logs the panic before the default handler runs.
pub fn init(verbosity: u8, log_file: Option<&Path>) {
    let mut builder = Builder::new();
    builder.filter_level(level_for(verbosity)).parse_default_env();

    if let Some(path) = log_file {
        match open_session_file(path) {
            Ok(file) => {
                let _ = LOG_PATH.set(path.to_path_buf());
                builder.target(Target::Pipe(Box::new(SessionSink { file })));
            }
            Err(e) => {
                // Can't open log file — not fatal, stderr still works
                eprintln!("[logger] Failed to open log file {:?}: {}", path, e);
            }
        }
    }

    if builder.try_init().is_err() {
        return;
    }

    if let Some(path) = log_path() {
        log::info!("session log: {}", path.display());
    }

    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log::error!("PANIC: {}", info);
        prev(info);
    }));
}
