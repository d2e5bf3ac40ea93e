//! Note Output
//!
//! A [`NoteSink`] that writes planned notes as JSON lines to any writer.
//! The headless binary points it at stdout so an external transport (or a
//! person with a terminal) can follow along; tests point it at a buffer.

use std::io::Write;

use sonifier::{NoteEvent, NoteSink};

pub struct JsonlSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> NoteSink for JsonlSink<W> {
    fn send(&mut self, event: NoteEvent) {
        match serde_json::to_string(&event) {
            Ok(line) => {
                if let Err(e) = writeln!(self.writer, "{}", line) {
                    tracing::warn!(error = %e, "could not write note event");
                }
            }
            Err(e) => tracing::warn!(error = %e, "could not serialize note event"),
        }
    }
}
