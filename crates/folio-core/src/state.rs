use std::sync::Arc;

use crate::command_registry::CommandRegistry;
use crate::command_registry::Dispatch;
use crate::config::ConsoleConfig;
use crate::history::InputHistory;
use crate::outputs;
use crate::payload::OutputPayload;
use crate::reveal::Reveal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Revealing,
    Settled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryInput {
    /// Synthetic welcome entry; rendered without a prompt line.
    Welcome,
    Command(String),
}

impl EntryInput {
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::Welcome => None,
            Self::Command(text) => Some(text),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub id: EntryId,
    pub input: EntryInput,
    pub output: OutputPayload,
    reveal_state: RevealState,
}

impl TranscriptEntry {
    pub fn reveal_state(&self) -> RevealState {
        self.reveal_state
    }

    pub fn is_settled(&self) -> bool {
        self.reveal_state == RevealState::Settled
    }
}

/// Ordered console conversation. Ids are never reused, even across clears.
#[derive(Debug, Clone)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    next_id: u64,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl Transcript {
    pub fn push(&mut self, input: EntryInput, output: OutputPayload, state: RevealState) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(TranscriptEntry {
            id,
            input,
            output,
            reveal_state: state,
        });
        id
    }

    /// Flips `id` to settled. Returns false if it was already settled or is
    /// no longer present.
    pub fn settle(&mut self, id: EntryId) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) if entry.reveal_state == RevealState::Revealing => {
                entry.reveal_state = RevealState::Settled;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: EntryId) -> Option<&TranscriptEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsolePhase {
    Idle,
    Dispatching,
}

impl ConsolePhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dispatching => "dispatching",
        }
    }
}

/// The in-flight reveal. At most one exists per session.
#[derive(Debug, Clone)]
pub struct ActiveReveal {
    pub reveal_id: u64,
    pub entry_id: EntryId,
    pub dispatch: Dispatch,
    pub engine: Reveal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatrixOverlay {
    pub active: bool,
    pub timer_id: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleSettings {
    pub chars_per_tick: usize,
    pub tick_interval_ms: u64,
    pub gui_redirect_delay_ms: u64,
    pub matrix_duration_ms: u64,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self::from(&ConsoleConfig::default())
    }
}

impl From<&ConsoleConfig> for ConsoleSettings {
    fn from(config: &ConsoleConfig) -> Self {
        Self {
            chars_per_tick: config.chars_per_tick.max(1),
            tick_interval_ms: config.tick_interval_ms,
            gui_redirect_delay_ms: config.gui_redirect_delay_ms,
            matrix_duration_ms: config.matrix_duration_ms,
        }
    }
}

/// One console session: transcript, recall history, input line and the
/// reveal/timer bookkeeping the reducer needs.
#[derive(Debug, Clone)]
pub struct ConsoleState {
    pub settings: ConsoleSettings,
    pub registry: Arc<CommandRegistry>,
    pub transcript: Transcript,
    pub history: InputHistory,
    pub input: String,
    pub phase: ConsolePhase,
    pub reveal: Option<ActiveReveal>,
    pub matrix: MatrixOverlay,
    pub pending_gui_redirect: Option<u64>,
    next_reveal_id: u64,
    next_timer_id: u64,
}

impl ConsoleState {
    pub fn new(registry: CommandRegistry, settings: ConsoleSettings) -> Self {
        let mut transcript = Transcript::default();
        transcript.push(
            EntryInput::Welcome,
            outputs::welcome(registry.content()),
            RevealState::Settled,
        );
        Self {
            settings,
            registry: Arc::new(registry),
            transcript,
            history: InputHistory::new(),
            input: String::new(),
            phase: ConsolePhase::Idle,
            reveal: None,
            matrix: MatrixOverlay::default(),
            pending_gui_redirect: None,
            next_reveal_id: 1,
            next_timer_id: 1,
        }
    }

    pub fn is_accepting(&self) -> bool {
        self.phase == ConsolePhase::Idle
    }

    pub(crate) fn allocate_reveal_id(&mut self) -> u64 {
        let id = self.next_reveal_id;
        self.next_reveal_id += 1;
        id
    }

    pub(crate) fn allocate_timer_id(&mut self) -> u64 {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        id
    }

    /// Partial text of `entry` while it is the one being revealed.
    pub fn partial_text(&self, entry: EntryId) -> Option<&str> {
        self.reveal
            .as_ref()
            .filter(|active| active.entry_id == entry)
            .map(|active| active.engine.visible_text())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::content::PortfolioContent;

    #[test]
    fn new_session_starts_with_settled_welcome() {
        let registry = CommandRegistry::new(Arc::new(PortfolioContent::sample()));
        let state = ConsoleState::new(registry, ConsoleSettings::default());
        assert_eq!(state.transcript.len(), 1);
        let welcome = state.transcript.last().unwrap();
        assert_eq!(welcome.input, EntryInput::Welcome);
        assert!(welcome.is_settled());
        assert!(state.is_accepting());
        assert!(state.history.is_empty());
    }

    #[test]
    fn settle_flips_exactly_once() {
        let mut transcript = Transcript::default();
        let id = transcript.push(
            EntryInput::Command("help".to_string()),
            OutputPayload::default(),
            RevealState::Revealing,
        );
        assert!(transcript.settle(id));
        assert!(!transcript.settle(id));
        assert_eq!(transcript.get(id).unwrap().reveal_state(), RevealState::Settled);
    }

    #[test]
    fn ids_stay_monotonic_across_clear() {
        let mut transcript = Transcript::default();
        let first = transcript.push(EntryInput::Welcome, OutputPayload::default(), RevealState::Settled);
        transcript.clear();
        let second = transcript.push(EntryInput::Welcome, OutputPayload::default(), RevealState::Settled);
        assert!(second > first);
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn settings_clamp_chunk_size() {
        let config = ConsoleConfig {
            chars_per_tick: 0,
            ..ConsoleConfig::default()
        };
        assert_eq!(ConsoleSettings::from(&config).chars_per_tick, 1);
    }
}
