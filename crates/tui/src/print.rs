use std::io::Write;

use drawnumber_core::{DrawNumberView, DrawResult, ObserverHandle};
use tracing::{trace, warn};

/// Output-only view writing one line per event to any writer.
///
/// It never raises events, so the observer handle is ignored.
pub struct PrintView<W> {
    out: W,
}

impl<W: Write> PrintView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        let written = writeln!(self.out, "{line}").and_then(|_| self.out.flush());
        if let Err(err) = written {
            warn!(%err, "Failed to write to print view");
        }
    }
}

impl<W: Write + Send> DrawNumberView for PrintView<W> {
    fn set_observer(&mut self, _observer: ObserverHandle) {
        trace!("Print view ignores observer registration");
    }

    fn start(&mut self) -> anyhow::Result<()> {
        self.write_line("New game started");
        Ok(())
    }

    fn result(&mut self, result: DrawResult) {
        self.write_line(result.description());
    }

    fn number_incorrect(&mut self) {
        self.write_line("You must enter a number in the range");
    }

    fn display_error(&mut self, message: &str) {
        self.write_line(&format!("Error: {message}"));
    }
}
