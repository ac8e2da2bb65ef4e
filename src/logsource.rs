use std::process::Command;
use std::sync::Arc;

use super::lifelog::{strip_marker, LifeLog, MARKER};

/// Returned by [`CommandSource`] when the external command can't be run.
pub const FAILURE_SENTINEL: &str = "failed to read from logcat";

/// Anything the screens can poll for the rendered lifecycle log.
pub trait LogSource: Send + Sync {
    /// Newest-first log text, one message per line.
    fn get_log(&self) -> String;
}

/// Default source: reads straight from the in-process ring buffer.
pub struct BufferSource {
    log: Arc<LifeLog>,
}

impl BufferSource {
    pub fn new(log: Arc<LifeLog>) -> Self {
        Self { log }
    }
}

impl LogSource for BufferSource {
    fn get_log(&self) -> String {
        self.log.render()
    }
}

/// Legacy-style source: runs an external log-inspection command, keeps only
/// the lines carrying the marker, and presents them newest-first with the
/// marker stripped. Any spawn or read failure degrades to the fixed
/// sentinel string; nothing propagates to the caller.
pub struct CommandSource {
    program: String,
    args: Vec<String>,
}

impl CommandSource {
    /// Build from a single command line, split on whitespace
    /// (e.g. `"logcat -d"`).
    pub fn from_command_line(command: &str) -> Self {
        let mut parts = command.split_whitespace().map(str::to_string);
        Self {
            program: parts.next().unwrap_or_default(),
            args: parts.collect(),
        }
    }
}

impl LogSource for CommandSource {
    fn get_log(&self) -> String {
        if self.program.is_empty() {
            return FAILURE_SENTINEL.to_string();
        }
        let output = match Command::new(&self.program).args(&self.args).output() {
            Ok(out) => out,
            Err(_) => return FAILURE_SENTINEL.to_string(),
        };
        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut log = String::new();
        for line in stdout.lines() {
            if line.contains(MARKER) {
                // Prepend so the final order is newest-first.
                log.insert_str(0, &format!("{}\n", strip_marker(line)));
            }
        }
        log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_source_mirrors_ring_buffer() {
        let log = Arc::new(LifeLog::new(8));
        log.append("C.on_stop()");
        let source = BufferSource::new(log);
        assert_eq!(source.get_log(), "C.on_stop()");
    }

    #[test]
    fn command_source_filters_and_reverses() {
        // printf expands the \n escapes in its format argument. The fake
        // log lines avoid spaces so the command line splits cleanly.
        let source = CommandSource::from_command_line(&format!(
            "printf noise\\n1:02>{MARKER}>A.on_create()\\nmore-noise\\n1:03>{MARKER}>A.on_start()\\n"
        ));
        let rendered = source.get_log();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, ["A.on_start()", "A.on_create()"]);
    }

    #[test]
    fn unmatched_lines_yield_empty_log() {
        let source = CommandSource::from_command_line("printf just\\nnoise\\n");
        assert_eq!(source.get_log(), "");
    }

    #[test]
    fn unavailable_command_degrades_to_sentinel() {
        let source = CommandSource::from_command_line("definitely-not-a-real-binary-zzz -d");
        assert_eq!(source.get_log(), FAILURE_SENTINEL);
    }

    #[test]
    fn empty_command_line_degrades_to_sentinel() {
        let source = CommandSource::from_command_line("   ");
        assert_eq!(source.get_log(), FAILURE_SENTINEL);
    }
}
