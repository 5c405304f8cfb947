//! Tracing setup
//!
//! Formats events without timestamps or ANSI colours (the browser console adds
//! its own). On wasm32 each event goes to the console method matching its level;
//! elsewhere events go to stderr.

use tracing::level_filters::LevelFilter;

use crate::error::{DashboardError, Result};

/// Parse a level name, falling back to `info`
pub fn parse_level(raw: &str) -> LevelFilter {
    raw.trim().parse().unwrap_or(LevelFilter::INFO)
}

/// Install the global subscriber
pub fn init_tracing(level: &str) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .without_time()
        .with_ansi(false)
        .with_target(false);

    #[cfg(target_arch = "wasm32")]
    let builder = builder.with_writer(console::ConsoleMakeWriter);
    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder.with_writer(std::io::stderr);

    builder
        .try_init()
        .map_err(|e| DashboardError::Telemetry(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;

    /// Buffers one formatted event and hands it to `console.*` on drop
    #[derive(Default)]
    pub struct ConsoleWriter {
        level: Option<Level>,
        buf: Vec<u8>,
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
            if self.buf.is_empty() {
                return;
            }
            let line = String::from_utf8_lossy(&self.buf);
            let line = wasm_bindgen::JsValue::from_str(line.trim_end());
            match self.level {
                Some(Level::ERROR) => web_sys::console::error_1(&line),
                Some(Level::WARN) => web_sys::console::warn_1(&line),
                Some(Level::INFO) => web_sys::console::info_1(&line),
                _ => web_sys::console::log_1(&line),
            }
        }
    }

    /// Makes a per-event writer that remembers the event level
    #[derive(Clone, Copy, Default)]
    pub struct ConsoleMakeWriter;

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter::default()
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter {
                level: Some(*meta.level()),
                buf: Vec::new(),
            }
        }
    }
}
