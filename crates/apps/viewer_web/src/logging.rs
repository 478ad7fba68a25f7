//! Sends `tracing` events from the shared crates to the browser console.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;
use web_sys::console;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

impl ConsoleMethod {
    fn for_level(level: Level) -> Self {
        if level == Level::ERROR {
            ConsoleMethod::Error
        } else if level == Level::WARN {
            ConsoleMethod::Warn
        } else if level == Level::INFO {
            ConsoleMethod::Info
        } else {
            ConsoleMethod::Debug
        }
    }
}

/// Buffers one formatted event and hands it to the console when dropped.
pub struct ConsoleWriter {
    method: ConsoleMethod,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            method: ConsoleMethod::for_level(level),
            buf: Vec::new(),
        }
    }

    fn line(&self) -> String {
        String::from_utf8_lossy(&self.buf).trim_end().to_string()
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() || !cfg!(target_arch = "wasm32") {
            return;
        }
        let line = JsValue::from_str(&self.line());
        match self.method {
            ConsoleMethod::Error => console::error_1(&line),
            ConsoleMethod::Warn => console::warn_1(&line),
            ConsoleMethod::Info => console::info_1(&line),
            ConsoleMethod::Debug => console::debug_1(&line),
        }
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Installs the console subscriber. Timestamps are left to the devtools.
pub fn init(max_level: Level) {
    let installed = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(max_level)
        .without_time()
        .with_target(false)
        .try_init();
    if installed.is_err() {
        crate::bridge::warn("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn levels_map_to_console_methods() {
        assert_eq!(ConsoleMethod::for_level(Level::ERROR), ConsoleMethod::Error);
        assert_eq!(ConsoleMethod::for_level(Level::WARN), ConsoleMethod::Warn);
        assert_eq!(ConsoleMethod::for_level(Level::INFO), ConsoleMethod::Info);
        assert_eq!(ConsoleMethod::for_level(Level::TRACE), ConsoleMethod::Debug);
    }

    #[test]
    fn writer_collects_one_trimmed_line() {
        let mut w = ConsoleMakeWriter.make_writer();
        write!(w, "ERROR search found nothing").expect("write");
        w.write_all(b" query=\"texas\"\n").expect("write");
        assert_eq!(w.method, ConsoleMethod::Info);
        assert_eq!(w.line(), "ERROR search found nothing query=\"texas\"");
    }
}
