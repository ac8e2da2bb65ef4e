use std::collections::VecDeque;
use std::sync::Mutex;
use chrono::Local;
use log::debug;

/// Marker distinguishing this app's lines from ambient log output.
pub const MARKER: &str = "screen-lifecycle";

/// Default number of lines kept before the oldest are dropped.
pub const DEFAULT_CAPACITY: usize = 512;

/// Append-only bounded log of lifecycle callback invocations.
///
/// Lines are stored oldest-first as `"<timestamp> <MARKER> <message>"`;
/// retrieval presents them newest-first with everything through the marker
/// stripped. Append is O(1), reading the k most recent entries is O(k).
pub struct LifeLog {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl LifeLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Append one tagged line, dropping the oldest when full. The same
    /// message is also emitted through the `log` facade so an external
    /// log inspector can pick it up.
    pub fn append(&self, message: &str) {
        debug!(target: MARKER, "{message}");
        let stamped = format!("{} {} {}", Local::now().format("%H:%M:%S%.3f"), MARKER, message);
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(stamped);
    }

    /// The `k` most recent messages, newest first, marker stripped.
    pub fn tail(&self, k: usize) -> Vec<String> {
        let lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.iter().rev().take(k).map(|l| strip_marker(l)).collect()
    }

    /// Every retained message, newest first, one per line.
    pub fn render(&self) -> String {
        self.tail(self.capacity).join("\n")
    }
}

/// Drop everything up to and including the marker and its separator.
/// Lines without the marker pass through untouched. External lines may
/// end right at the marker or follow it with a multi-byte separator, so
/// the cut point is never assumed to be in bounds or on a char boundary.
pub fn strip_marker(line: &str) -> String {
    match line.find(MARKER) {
        Some(idx) => {
            let rest = &line[idx + MARKER.len()..];
            let mut chars = rest.chars();
            chars.next();
            chars.as_str().to_string()
        }
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_newest_first_without_marker() {
        let log = LifeLog::new(16);
        log.append("A.on_create()");
        log.append("A.on_start()");
        let rendered = log.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, ["A.on_start()", "A.on_create()"]);
    }

    #[test]
    fn capacity_drops_oldest() {
        let log = LifeLog::new(2);
        log.append("one");
        log.append("two");
        log.append("three");
        assert_eq!(log.tail(10), ["three", "two"]);
    }

    #[test]
    fn tail_is_bounded_by_k() {
        let log = LifeLog::new(16);
        for i in 0..5 {
            log.append(&format!("line {i}"));
        }
        assert_eq!(log.tail(2), ["line 4", "line 3"]);
    }

    #[test]
    fn strip_handles_line_ending_at_marker() {
        assert_eq!(strip_marker(&format!("1:02 {MARKER}")), "");
    }

    #[test]
    fn strip_handles_multibyte_separator() {
        assert_eq!(strip_marker(&format!("1:02 {MARKER}»A.on_create()")), "A.on_create()");
    }

    #[test]
    fn large_capacity_is_fully_retained() {
        let log = LifeLog::new(DEFAULT_CAPACITY + 8);
        for i in 0..DEFAULT_CAPACITY + 8 {
            log.append(&format!("line {i}"));
        }
        assert_eq!(log.tail(1), [format!("line {}", DEFAULT_CAPACITY + 7)]);
        assert_eq!(log.tail(usize::MAX).len(), DEFAULT_CAPACITY + 8);
    }

    #[test]
    fn render_is_idempotent() {
        let log = LifeLog::new(16);
        log.append("B.on_resume()");
        assert_eq!(log.render(), log.render());
    }
}
