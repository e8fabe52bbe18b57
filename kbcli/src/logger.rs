//! Terminal sink for the `log` facade.

use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes records to stderr as `HH:MM:SS.mmm LEVEL module: message`.
pub struct TermLogger {
    level: LevelFilter,
    choice: ColorChoice,
}

impl TermLogger {
    /// Installs the logger globally. `verbosity` 0 is `info`, 1 `debug`, 2+ `trace`.
    pub fn install(verbosity: u8) -> Result<(), log::SetLoggerError> {
        let level = match verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        let choice = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };

        log::set_boxed_logger(Box::new(TermLogger { level, choice }))?;
        log::set_max_level(level);
        Ok(())
    }

    fn color(level: Level) -> Color {
        match level {
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Info => Color::Green,
            Level::Debug => Color::Blue,
            Level::Trace => Color::Magenta,
        }
    }
}

impl Log for TermLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut stream = StandardStream::stderr(self.choice);
        let timepoint = chrono::Local::now().format("%H:%M:%S%.3f");
        let _ = write!(stream, "{} ", timepoint);
        let _ = stream.set_color(
            ColorSpec::new()
                .set_fg(Some(Self::color(record.level())))
                .set_bold(true),
        );
        let _ = write!(stream, "{:<5}", record.level());
        let _ = stream.reset();
        let _ = writeln!(
            stream,
            " {}: {}",
            record.module_path().unwrap_or("<unknown>"),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
