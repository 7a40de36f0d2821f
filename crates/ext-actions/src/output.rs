//! Captured action output

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

/// Source of the text produced by the most recent actions.
pub trait OutputCapture {
    fn output(&self) -> String;
}

/// Shared in-memory output buffer.
///
/// Clones share one buffer, so the same handle can be given to every
/// executor and to the package manager that reports the output.
#[derive(Debug, Clone, Default)]
pub struct BufferedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        // A panicked writer leaves plain bytes behind; keep using them
        self.buffer.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn append(&self, bytes: &[u8]) {
        self.lock().extend_from_slice(bytes);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl OutputCapture for BufferedOutput {
    fn output(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }
}

impl io::Write for BufferedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
