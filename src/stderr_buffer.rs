use std::io::{self, Write};
use std::sync::Mutex;

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

/// Activate buffering. While active, log lines are stored instead of being
/// printed over the TUI.
pub fn activate() {
    if let Ok(mut guard) = BUFFER.lock() {
        *guard = Some(Vec::new());
    }
}

/// Deactivate buffering and return all collected lines.
pub fn drain() -> Vec<String> {
    BUFFER
        .lock()
        .ok()
        .and_then(|mut guard| guard.take())
        .unwrap_or_default()
}

/// Store `msg` if buffering is active, otherwise print it to stderr.
pub fn emit(msg: String) {
    let mut guard = match BUFFER.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprint!("{}", msg);
    }
}

/// `io::Write` sink for the tracing subscriber. Each formatted event arrives
/// as one write and is routed through [`emit`].
#[derive(Debug, Default, Clone, Copy)]
pub struct BufferedStderr;

impl Write for BufferedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        emit(String::from_utf8_lossy(buf).into_owned());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the buffer is process-global.
    #[test]
    fn test_buffer_lifecycle() {
        activate();
        emit("first\n".to_string());
        BufferedStderr.write_all(b"second\n").unwrap();

        let lines = drain();
        assert_eq!(lines, vec!["first\n".to_string(), "second\n".to_string()]);

        // Inactive again: nothing collected
        emit("to stderr\n".to_string());
        assert!(drain().is_empty());
    }
}
