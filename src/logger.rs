//! Logging to stderr for the `quill` binary.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::{
    io::Write,
    sync::atomic::{AtomicBool, Ordering},
};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Whether records from crates outside the workspace are shown.
static DEPENDENCY_LOGS: AtomicBool = AtomicBool::new(false);

struct StderrLogger {
    out: StandardStream,
    pretty: bool,
}

impl StderrLogger {
    fn style(level: Level) -> (&'static str, Color) {
        match level {
            Level::Error => ("error", Color::Red),
            Level::Warn => ("warn", Color::Magenta),
            Level::Info => ("info", Color::Yellow),
            Level::Debug => ("debug", Color::Cyan),
            Level::Trace => ("trace", Color::Blue),
        }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
            || is_quill_target(metadata.target())
            || DEPENDENCY_LOGS.load(Ordering::Relaxed)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let (name, color) = Self::style(record.level());
        let mut out = self.out.lock();

        if self.pretty {
            out.set_color(ColorSpec::new().set_bold(true).set_fg(Some(color))).ok();
        }

        write!(out, "{}", name).ok();

        if self.pretty {
            out.reset().ok();
        }

        // Targets are only shown at debug and trace.
        if record.level() >= Level::Debug {
            write!(out, " [{}]", short_target(record.target())).ok();
        }

        writeln!(out, ": {}", record.args()).ok();
    }

    fn flush(&self) {
        self.out.lock().flush().ok();
    }
}

fn is_quill_target(target: &str) -> bool {
    target == "quill" || target.starts_with("quill::") || target.starts_with("quill_")
}

/// Strip the crate prefix from workspace targets, `quill_runtime::eval`
/// becomes `runtime::eval`.
fn short_target(target: &str) -> &str {
    target.strip_prefix("quill_").unwrap_or(target)
}

/// Install the stderr logger. Only warnings and errors are shown until the
/// level is changed with [`verbose`] or [`quiet`].
pub fn init() {
    let pretty = atty::is(atty::Stream::Stderr);
    let logger = StderrLogger {
        out: StandardStream::stderr(if pretty {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        }),
        pretty,
    };

    if log::set_boxed_logger(Box::new(logger)).is_err() {
        return;
    }

    log::set_max_level(LevelFilter::Warn);
    log_panics::init();
}

/// Raise the log level. Info and debug records only come from Quill's own
/// crates; at the trace level records from dependencies are shown too.
pub fn verbose(verbosity: u8) {
    DEPENDENCY_LOGS.store(verbosity >= 3, Ordering::Relaxed);

    log::set_max_level(match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    });
}

pub fn quiet() {
    log::set_max_level(LevelFilter::Off);
}
