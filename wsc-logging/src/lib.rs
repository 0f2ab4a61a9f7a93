//! Tracing subscriber setup shared by the console binaries.
//!
//! Behaviour is driven by environment variables so the same binary can log
//! to the terminal during interactive use and to a rolling file when it runs
//! as a long-lived watcher:
//!
//! - `LOG_LEVEL`: default filter directive (`info`), overridden by `RUST_LOG`
//! - `LOG_OUTPUT`: `console`, `file`, `both` or `none`
//! - `LOG_FORMAT`: `human` or `json`
//! - `LOG_FILE_PATH`: file used when `LOG_OUTPUT` includes `file`

use std::{
    env,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::MakeWriter, prelude::*, registry, EnvFilter};

const DEFAULT_LOG_FILE: &str = "/tmp/wsc.log";

// --- Tee writer: console and file at the same time ---
struct Tee<A, B> {
    a: A,
    b: B,
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let res_a = self.a.write(buf);
        let res_b = self.b.write(buf);
        res_a.or(res_b)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.a.flush()?;
        self.b.flush()
    }
}

#[derive(Clone)]
struct MakeTee<A, B> {
    make_a: A,
    make_b: B,
}

impl<'a, A, B> MakeWriter<'a> for MakeTee<A, B>
where
    A: MakeWriter<'a>,
    B: MakeWriter<'a>,
{
    type Writer = Tee<A::Writer, B::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        Tee {
            a: self.make_a.make_writer(),
            b: self.make_b.make_writer(),
        }
    }
}

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Console,
    File,
    Both,
    None,
}

impl LogOutput {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => LogOutput::File,
            "both" => LogOutput::Both,
            "none" | "off" => LogOutput::None,
            _ => LogOutput::Console,
        }
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub output: LogOutput,
    pub json: bool,
    pub file_path: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: LogOutput::Console,
            json: false,
            file_path: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl LogSettings {
    /// Reads `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT` and `LOG_FILE_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            level: lookup("LOG_LEVEL").unwrap_or(defaults.level),
            output: lookup("LOG_OUTPUT")
                .map(|v| LogOutput::parse(&v))
                .unwrap_or(defaults.output),
            json: lookup("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
            file_path: lookup("LOG_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.file_path),
        }
    }

    fn filter(&self) -> EnvFilter {
        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        for directive in ["hyper=warn", "hyper_util=warn", "reqwest=warn"] {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }
        filter
    }
}

fn install<W>(settings: &LogSettings, writer: W) -> bool
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(writer);
    let subscriber = registry().with(settings.filter());

    if settings.json {
        subscriber.with(fmt_layer.json()).try_init().is_ok()
    } else {
        subscriber.with(fmt_layer).try_init().is_ok()
    }
}

fn file_writer(path: &Path) -> (tracing_appender::non_blocking::NonBlocking, WorkerGuard) {
    let dir = path.parent().unwrap_or_else(|| Path::new("/tmp"));
    let filename = path.file_name().unwrap_or("wsc.log".as_ref());
    tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, filename))
}

/// Installs the global subscriber described by `settings`.
///
/// The returned guard must be held for as long as file output is wanted;
/// dropping it flushes and stops the background writer. A subscriber that is
/// already installed is left in place.
pub fn init_with(settings: &LogSettings) -> Option<WorkerGuard> {
    match settings.output {
        LogOutput::None => None,
        LogOutput::Console => {
            install(settings, io::stderr);
            None
        }
        LogOutput::File => {
            let (writer, guard) = file_writer(&settings.file_path);
            install(settings, writer).then_some(guard)
        }
        LogOutput::Both => {
            let (writer, guard) = file_writer(&settings.file_path);
            let tee = MakeTee {
                make_a: io::stderr,
                make_b: writer,
            };
            install(settings, tee).then_some(guard)
        }
    }
}

/// Initializes the global tracing subscriber based on environment variables.
pub fn init_subscriber() -> Option<WorkerGuard> {
    init_with(&LogSettings::from_env())
}
