//! `log` backend for the boot stage. Lines go straight to the console, one
//! `write_fmt` per record so harts do not interleave mid-line.

use log::{LevelFilter, Log, Metadata, Record};

use crate::config::LOG_LEVEL;

pub struct BootLogger {
    level: LevelFilter,
}

impl BootLogger {
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for BootLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            crate::kprintln!("[{:>5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: BootLogger = BootLogger::new(LOG_LEVEL);

/// Every hart calls this on entry. The first one installs the logger, the
/// rest find it already there.
pub fn init() {
    crate::driver::init();
    log::set_max_level(LOG_LEVEL);
    let _ = log::set_logger(&LOGGER);
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    fn metadata(level: Level) -> Metadata<'static> {
        Metadata::builder().level(level).target("hartboot").build()
    }

    #[test]
    fn filters_by_level() {
        let logger = BootLogger::new(LevelFilter::Info);
        assert!(logger.enabled(&metadata(Level::Error)));
        assert!(logger.enabled(&metadata(Level::Info)));
        assert!(!logger.enabled(&metadata(Level::Debug)));
    }

    #[test]
    fn off_disables_everything() {
        let logger = BootLogger::new(LevelFilter::Off);
        assert!(!logger.enabled(&metadata(Level::Error)));
    }
}
