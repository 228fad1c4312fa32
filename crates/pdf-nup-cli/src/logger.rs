use chrono::Local;
use log::{LevelFilter, Metadata, Record};

/// Writes log records to stderr as
/// `timestamp | LEVEL    | target:line - message`
#[derive(Clone)]
pub struct CliLogger {
    level: LevelFilter,
}

impl CliLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Map `-v` occurrences to a level: none = info, one = debug, more = trace
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        Self::new(level)
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    fn format(record: &Record) -> String {
        format!(
            "{} | {:<8} | {}:{} - {}",
            Local::now().format("%Y-%m-%d:%H:%M:%S,%3f"),
            record.level(),
            record.target(),
            record.line().unwrap_or(0),
            record.args()
        )
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", Self::format(record));
        }
    }

    fn flush(&self) {}
}
