use crate::payload::OutputPayload;

pub const DEFAULT_CHARS_PER_TICK: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealFrame {
    /// Text revealed so far, as a plain flattened prefix.
    Partial(String),
    /// The whole stream has been shown; emitted exactly once.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealStatus {
    Running,
    Completed,
    Canceled,
}

/// Typed-reveal of one payload.
///
/// Each [`Reveal::tick`] advances a fixed chunk of characters. Once the whole
/// stream is visible the next tick yields [`RevealFrame::Complete`]; after
/// that, or after [`Reveal::cancel`], the sequence is exhausted. A reveal is
/// not restartable.
#[derive(Debug, Clone)]
pub struct Reveal {
    stream: String,
    total_chars: usize,
    shown_chars: usize,
    shown_bytes: usize,
    chars_per_tick: usize,
    status: RevealStatus,
}

impl Reveal {
    pub fn new(payload: &OutputPayload, chars_per_tick: usize) -> Self {
        let stream = payload.flatten();
        let total_chars = stream.chars().count();
        Self {
            stream,
            total_chars,
            shown_chars: 0,
            shown_bytes: 0,
            chars_per_tick: chars_per_tick.max(1),
            status: RevealStatus::Running,
        }
    }

    pub fn tick(&mut self) -> Option<RevealFrame> {
        if self.status != RevealStatus::Running {
            return None;
        }
        if self.shown_chars >= self.total_chars {
            self.status = RevealStatus::Completed;
            return Some(RevealFrame::Complete);
        }

        let step = self.chars_per_tick.min(self.total_chars - self.shown_chars);
        self.shown_bytes = self.stream[self.shown_bytes..]
            .char_indices()
            .nth(step)
            .map_or(self.stream.len(), |(offset, _)| self.shown_bytes + offset);
        self.shown_chars += step;
        Some(RevealFrame::Partial(self.visible_text().to_string()))
    }

    /// Abandons the reveal. No further frames and no completion.
    pub fn cancel(&mut self) {
        if self.status == RevealStatus::Running {
            self.status = RevealStatus::Canceled;
        }
    }

    pub fn visible_text(&self) -> &str {
        &self.stream[..self.shown_bytes]
    }

    pub fn progress(&self) -> (usize, usize) {
        (self.shown_chars, self.total_chars)
    }

    pub fn is_running(&self) -> bool {
        self.status == RevealStatus::Running
    }

    pub fn is_completed(&self) -> bool {
        self.status == RevealStatus::Completed
    }

    pub fn is_canceled(&self) -> bool {
        self.status == RevealStatus::Canceled
    }
}

impl Iterator for Reveal {
    type Item = RevealFrame;

    fn next(&mut self) -> Option<Self::Item> {
        self.tick()
    }
}
