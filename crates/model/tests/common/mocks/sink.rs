//! Capturing sink shared between a UART and the asserting test.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// `Write` implementation appending into a shared byte buffer.
///
/// The same buffer handle stays with the test, so bytes egressed by the UART
/// can be asserted on after the fact. Flushes are counted so tests can check
/// the flush-per-byte egress contract.
#[derive(Clone)]
pub struct SharedSink {
    buf: Arc<Mutex<Vec<u8>>>,
    flushes: Arc<Mutex<usize>>,
}

impl SharedSink {
    /// Creates a sink and returns it with handles to its buffer and flush
    /// counter.
    pub fn new() -> (Self, Arc<Mutex<Vec<u8>>>, Arc<Mutex<usize>>) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let flushes = Arc::new(Mutex::new(0));
        let sink = Self {
            buf: Arc::clone(&buf),
            flushes: Arc::clone(&flushes),
        };
        (sink, buf, flushes)
    }
}

impl Write for SharedSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if let Ok(mut buf) = self.buf.lock() {
            buf.extend_from_slice(data);
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Ok(mut flushes) = self.flushes.lock() {
            *flushes += 1;
        }
        Ok(())
    }
}
