//! Optional `env_logger` bootstrap, mirroring the teacher workspace's
//! `common::logging`. The crate never initializes a logger on its own;
//! callers opt in with [`init_logging`].

use log::{info, Level};

/// Logger configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level to emit.
    pub level: Level,
    /// Whether to emit single-line JSON records instead of plain text.
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            json_format: false,
        }
    }
}

/// Initializes `env_logger` with the given configuration.
///
/// Safe to call more than once: later calls are no-ops, since
/// `env_logger`'s `try_init` refuses to install a second global logger.
pub fn init_logging(config: &LoggingConfig) {
    let level = config.level.to_level_filter();
    let format = if config.json_format {
        formatting::json_format
    } else {
        formatting::text_format
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format(format)
        .target(env_logger::Target::Stdout)
        .try_init();

    info!("navfield logging initialized at level {level}");
}

mod formatting {
    use log::Record;
    use std::io::Write;

    pub fn json_format(
        buf: &mut env_logger::fmt::Formatter,
        record: &Record,
    ) -> std::io::Result<()> {
        writeln!(
            buf,
            "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"target\":\"{}\",\"message\":\"{}\"}}",
            chrono::Local::now().to_rfc3339(),
            record.level(),
            record.target(),
            record.args()
        )
    }

    pub fn text_format(
        buf: &mut env_logger::fmt::Formatter,
        record: &Record,
    ) -> std::io::Result<()> {
        writeln!(
            buf,
            "[{}] {}: {}",
            chrono::Local::now().to_rfc3339(),
            record.level(),
            record.args()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initializes_logger_idempotently() {
        init_logging(&LoggingConfig::default());
        init_logging(&LoggingConfig::default());
    }
}
