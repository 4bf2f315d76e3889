//! # Logging
//!
//! Editing components do not log through a process-wide singleton. Each one is handed a
//! [`SharedLogger`] when it is built and writes its records there. The default logger forwards
//! to whatever the `log` facade has installed, so hosts that already call
//! `env_logger::init()` need nothing extra, while hosts (and tests) that want isolated output
//! can inject their own `log::Log` implementation.

use std::sync::Arc;

use log::{Log, Metadata, Record};

/// A logger injected into an editing component at construction.
pub type SharedLogger = Arc<dyn Log>;

/// Forwards every record to the logger installed in the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeLogger;

impl Log for FacadeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            log::logger().log(record);
        }
    }

    fn flush(&self) {
        log::logger().flush();
    }
}

/// The logger used when a component is built without one.
pub fn facade_logger() -> SharedLogger {
    Arc::new(FacadeLogger)
}

/// Writes a formatted record to an injected [`SharedLogger`].
///
/// ```
/// use voxel_terraform::{core::logging::facade_logger, log_to};
///
/// let logger = facade_logger();
/// log_to!(logger, "voxel_terraform::demo", log::Level::Info, "placed {} voxels", 3);
/// ```
#[macro_export]
macro_rules! log_to {
    ($logger:expr, $target:expr, $level:expr, $($arg:tt)+) => {{
        let logger: &dyn ::log::Log = &*$logger;
        let level: ::log::Level = $level;
        if logger.enabled(&::log::Metadata::builder().level(level).target($target).build()) {
            logger.log(
                &::log::Record::builder()
                    .args(format_args!($($arg)+))
                    .level(level)
                    .target($target)
                    .module_path_static(Some(module_path!()))
                    .file_static(Some(file!()))
                    .line(Some(line!()))
                    .build(),
            );
        }
    }};
}


#[cfg(test)]
mod tests {
    use log::Level;

    use super::test_support::CapturingLogger;
    use super::*;

    #[test]
    fn test_log_to_writes_into_the_injected_logger() {
        let capture = CapturingLogger::shared();
        let logger: SharedLogger = capture.clone();
        log_to!(logger, "voxel_terraform::test", Level::Warn, "nothing to {}", "cut");
        assert_eq!(capture.messages(Level::Warn), vec!["nothing to cut".to_string()]);
        assert!(capture.messages(Level::Info).is_empty());
    }

    #[test]
    fn test_facade_logger_accepts_records_without_a_backend() {
        let logger = facade_logger();
        log_to!(logger, "voxel_terraform::test", Level::Info, "no backend installed");
        logger.flush();
    }
}
