use std::io::{ErrorKind, Read};

use tracing::{debug, warn};

use super::keymap::{Layout, translate};
use super::keys::KeyEvent;
use super::queue::EventQueue;
use super::report::{BootReport, diff};

/// Size of the read buffer handed to the transport. Large enough for a
/// report with an ID prefix and any vendor padding.
pub const READ_BUF_LEN: usize = 64;

/// What one [`InputDecoder::ingest_available`] pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestSummary {
    /// Reports decoded and applied.
    pub reports: usize,
    /// Chunks too short to hold a report.
    pub discarded: usize,
    /// Events queued for the engine.
    pub queued: usize,
    /// Events lost because the queue was full.
    pub dropped: usize,
    /// Read error that ended the pass early, other than "would block".
    pub error: Option<ErrorKind>,
}

impl IngestSummary {
    fn absorb(&mut self, other: ChunkOutcome) {
        match other {
            ChunkOutcome::Discarded => self.discarded += 1,
            ChunkOutcome::Applied { queued, dropped } => {
                self.reports += 1;
                self.queued += queued;
                self.dropped += dropped;
            }
        }
    }
}

/// Result of feeding a single transport chunk to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// Too short to be a report; decoder state untouched.
    Discarded,
    Applied { queued: usize, dropped: usize },
}

/// Turns a stream of boot keyboard reports into queued key events.
///
/// Owns the last report seen and the event queue. Each new report is
/// compared against the previous one only, so the engine sees transitions
/// and never steady state.
pub struct InputDecoder {
    previous: BootReport,
    queue: EventQueue,
    layout: Layout,
}

impl InputDecoder {
    pub fn new(layout: Layout) -> Self {
        Self {
            previous: BootReport::EMPTY,
            queue: EventQueue::new(),
            layout,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The last report applied.
    pub fn previous(&self) -> &BootReport {
        &self.previous
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drain every report `source` has ready right now.
    ///
    /// `source` must be non-blocking. "Would block" and end-of-stream end
    /// the pass quietly; any other read error ends it with a warning and
    /// leaves decoder state as it was after the last good report.
    pub fn ingest_available<R: Read + ?Sized>(&mut self, source: &mut R) -> IngestSummary {
        let mut summary = IngestSummary::default();
        let mut buf = [0u8; READ_BUF_LEN];

        loop {
            let n = match source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(error = %e, "keyboard read failed, retrying next tick");
                    summary.error = Some(e.kind());
                    break;
                }
            };
            summary.absorb(self.ingest_chunk(&buf[..n]));
        }

        if summary.dropped > 0 {
            warn!(dropped = summary.dropped, "key event queue full, events dropped");
        }
        summary
    }

    /// Apply one transport chunk: frame it, diff against the previous
    /// report, translate and queue the edges, then remember it.
    pub fn ingest_chunk(&mut self, chunk: &[u8]) -> ChunkOutcome {
        let Some(report) = BootReport::from_chunk(chunk) else {
            debug!(len = chunk.len(), "discarding short keyboard chunk");
            return ChunkOutcome::Discarded;
        };

        let mut queued = 0;
        let mut dropped = 0;
        for edge in diff(self.previous, report) {
            let Some(code) = translate(self.layout, edge.usage) else {
                continue;
            };
            let event = KeyEvent {
                pressed: edge.pressed,
                code,
            };
            match self.queue.try_push(event) {
                Ok(()) => queued += 1,
                Err(_) => dropped += 1,
            }
        }

        self.previous = report;
        ChunkOutcome::Applied { queued, dropped }
    }

    /// Next queued event, oldest first.
    pub fn pop(&mut self) -> Option<KeyEvent> {
        self.queue.pop()
    }
}

impl Default for InputDecoder {
    fn default() -> Self {
        Self::new(Layout::Standard)
    }
}
