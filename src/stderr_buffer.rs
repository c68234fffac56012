use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn lock() -> MutexGuard<'static, Option<Vec<String>>> {
    BUFFER.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Activate buffering. While active, log lines are stored instead of
/// being printed to stderr.
pub fn activate() {
    *lock() = Some(Vec::new());
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    lock().take().unwrap_or_default()
}

/// Write a message. If buffering is active the message is stored;
/// otherwise it is printed to stderr immediately.
pub fn warn(msg: String) {
    let mut guard = lock();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// `tracing_subscriber` writer that routes formatted log lines through the buffer
pub struct BufferedStderr;

impl io::Write for BufferedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let line = text.trim_end_matches('\n');
        if !line.is_empty() {
            warn(line.to_string());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer factory for `tracing_subscriber::fmt().with_writer(...)`
pub fn writer() -> BufferedStderr {
    BufferedStderr
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_buffered_lines_are_drained_in_order() {
        activate();
        warn("first".to_string());
        writer().write_all(b"second\n").unwrap();
        writer().write_all(b"\n").unwrap();

        let drained = drain();
        assert_eq!(drained, vec!["first".to_string(), "second".to_string()]);
        assert!(drain().is_empty());
    }
}
