use std::sync::{Mutex, MutexGuard};

use log::{debug, error, info, log_enabled, warn, Level, LevelFilter};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Root};
use log4rs::encode::json::JsonEncoder;
use log4rs::Handle;
use once_cell::sync::Lazy;

use crate::error::AppError;

/// Logger singleton
pub static LOG: Lazy<Mutex<Logger>> = Lazy::new(|| {
    Mutex::new(Logger {
        handle: None,
        visitor: None,
    })
});

/// Access logger singleton (a poisoned lock still yields the logger)
fn logger() -> MutexGuard<'static, Logger> {
    LOG.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Logger debug log function
pub fn debug(target: &str, msg: &str) {
    logger().debug(target, msg);
}

/// Logger info log function
pub fn info(target: &str, msg: &str) {
    logger().info(target, msg);
}

/// Logger warn log function
pub fn warn(target: &str, msg: &str) {
    logger().warn(target, msg);
}

/// Logger error log function
pub fn error(target: &str, msg: &str) {
    logger().error(target, msg);
}

/// Simplify code location macro usage for log target
#[macro_export]
macro_rules! target {
    () => {{
        format!("{}:{}:{}", file!(), line!(), column!())
    }};
}

pub use target;

/// Logging level used to configure the logger
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogLevel {
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::DEBUG => LevelFilter::Debug,
            LogLevel::INFO => LevelFilter::Info,
            LogLevel::WARN => LevelFilter::Warn,
            LogLevel::ERROR => LevelFilter::Error,
        }
    }
}

/// Logging implementation, backed by log4rs
pub struct Logger {
    handle: Option<Handle>,
    visitor: Option<fn(LogLevel, &str)>,
}

impl Logger {
    /// Configure logger. Log records are written (JSON encoded) to STDERR, so they do not
    /// interleave with the shell output stream.
    ///
    /// # Arguments
    ///
    /// * `level_filter` - Minimum level of records to emit
    /// * `visitor` - Optional function invoked after each emitted record (ie used to redraw a prompt)
    ///
    /// # Returns
    ///
    /// A [`Result`] indicating success/failure of the logger initialization.
    ///
    pub fn configure(
        &mut self,
        level_filter: LogLevel,
        visitor: Option<fn(LogLevel, &str)>,
    ) -> Result<(), AppError> {
        let level_filter: LevelFilter = level_filter.into();

        let stderr: ConsoleAppender = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(JsonEncoder::new()))
            .build();
        let log_config = log4rs::config::Config::builder()
            .appender(Appender::builder().build("stderr", Box::new(stderr)))
            .build(Root::builder().appender("stderr").build(level_filter))
            .map_err(|err| {
                AppError::GenWithMsgAndErr("Invalid logging config".to_string(), Box::new(err))
            })?;

        match &self.handle {
            Some(handle) => handle.set_config(log_config),
            None => {
                self.handle = Some(log4rs::init_config(log_config).map_err(|err| {
                    AppError::GenWithMsgAndErr(
                        "Failed to initialize logger".to_string(),
                        Box::new(err),
                    )
                })?);
            }
        }
        self.visitor = visitor;

        Ok(())
    }

    /// debug-level logging
    pub fn debug(&self, target: &str, msg: &str) {
        if log_enabled!(Level::Debug) {
            debug!(target: target, "{}", msg);
            self.visit(LogLevel::DEBUG, msg);
        }
    }

    /// info-level logging
    pub fn info(&self, target: &str, msg: &str) {
        if log_enabled!(Level::Info) {
            info!(target: target, "{}", msg);
            self.visit(LogLevel::INFO, msg);
        }
    }

    /// warn-level logging
    pub fn warn(&self, target: &str, msg: &str) {
        if log_enabled!(Level::Warn) {
            warn!(target: target, "{}", msg);
            self.visit(LogLevel::WARN, msg);
        }
    }

    /// error-level logging
    pub fn error(&self, target: &str, msg: &str) {
        if log_enabled!(Level::Error) {
            error!(target: target, "{}", msg);
            self.visit(LogLevel::ERROR, msg);
        }
    }

    fn visit(&self, level: LogLevel, msg: &str) {
        if let Some(visitor) = self.visitor {
            visitor(level, msg);
        }
    }
}

/// Unit tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loglevel_into_levelfilter() {
        assert_eq!(LevelFilter::from(LogLevel::DEBUG), LevelFilter::Debug);
        assert_eq!(LevelFilter::from(LogLevel::INFO), LevelFilter::Info);
        assert_eq!(LevelFilter::from(LogLevel::WARN), LevelFilter::Warn);
        assert_eq!(LevelFilter::from(LogLevel::ERROR), LevelFilter::Error);
    }

    #[test]
    fn target_macro_contains_location() {
        let location = target!();
        assert!(location.starts_with(file!()));
    }

    #[test]
    fn logger_log_when_unconfigured() {
        debug(&target!(), "debug msg");
        info(&target!(), "info msg");
        warn(&target!(), "warn msg");
        error(&target!(), "error msg");
    }
}
