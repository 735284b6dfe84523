use std::fs::OpenOptions;
use std::io::{self, Write};

use tracing::Level;

/// Writer that appends to the file named by `MENUFORGE_LOG`, or discards
/// everything when the variable is unset. Stderr is not an option here:
/// the designer runs on the alternate screen, where stray writes corrupt
/// the canvas.
pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(std::fs::File),
    Sink(io::Sink),
}

impl DelegatingWriter {
    fn new() -> Self {
        let file = std::env::var_os("MENUFORGE_LOG")
            .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok());
        match file {
            Some(f) => DelegatingWriter {
                inner: DelegatingInner::File(f),
            },
            None => DelegatingWriter {
                inner: DelegatingInner::Sink(io::sink()),
            },
        }
    }
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(f) => f.write(buf),
            DelegatingInner::Sink(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(f) => f.flush(),
            DelegatingInner::Sink(s) => s.flush(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SubscriberMakeWriter;

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter::new()
    }
}

/// Initialize the global tracing subscriber. Safe to call multiple times;
/// subsequent calls are no-ops.
pub fn init_default() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(SubscriberMakeWriter)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}
