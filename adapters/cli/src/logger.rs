//! Timestamped line logger shared by the whole binary.

use std::sync::OnceLock;

use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Debug)]
struct Logger {
    enabled: bool,
}

impl Logger {
    fn log(&self, file: &str, line: u32, message: &str) {
        if !self.enabled {
            return;
        }
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        println!("{}", format_line(&timestamp.to_string(), file, line, message));
    }
}

fn format_line(timestamp: &str, file: &str, line: u32, message: &str) -> String {
    let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
    format!("[{timestamp}][{file_name}:{line}] {message}")
}

/// Installs the process-wide logger. Later calls keep the first configuration.
pub(crate) fn init_logger(enabled: bool) {
    let _ = LOGGER.get_or_init(|| Logger { enabled });
}

/// Writes one log line. Messages logged before initialisation are dropped.
pub(crate) fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    }
}

/// Logs a formatted message tagged with the calling file and line.
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::format_line;

    #[test]
    fn lines_carry_timestamp_file_name_and_line() {
        let line = format_line(
            "2024-05-01 12:00:00",
            "adapters/cli/src/main.rs",
            42,
            "maze ready",
        );

        assert_eq!(line, "[2024-05-01 12:00:00][main.rs:42] maze ready");
    }

    #[test]
    fn windows_paths_are_shortened_too() {
        let line = format_line("t", r"src\simulation.rs", 7, "x");

        assert_eq!(line, "[t][simulation.rs:7] x");
    }
}
