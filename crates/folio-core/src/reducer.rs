#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    Landing,
    AlternateUi,
}

impl NavigationTarget {
    pub fn label(self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::AlternateUi => "alternate-ui",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEffect {
    RequestFrame,
    ScheduleRevealTick { reveal_id: u64, after_ms: u64 },
    ScheduleGuiRedirect { timer_id: u64, after_ms: u64 },
    ScheduleMatrixClear { timer_id: u64, after_ms: u64 },
    SetMatrixOverlay(bool),
    RevealCompleted(EntryId),
    Navigate(NavigationTarget),
}

use super::actions::ConsoleAction;
use super::actions::RuntimeAction;
use super::actions::UserAction;
use super::command_registry::ControlSignal;
use super::reveal::Reveal;
use super::reveal::RevealFrame;
use super::state::ActiveReveal;
use super::state::ConsolePhase;
use super::state::ConsoleState;
use super::state::EntryId;
use super::state::EntryInput;
use super::state::MatrixOverlay;
use super::state::RevealState;

pub fn reduce(state: &mut ConsoleState, action: ConsoleAction) -> Vec<ConsoleEffect> {
    match action {
        ConsoleAction::User(user) => reduce_user(state, user),
        ConsoleAction::Runtime(runtime) => reduce_runtime(state, runtime),
    }
}

fn reduce_user(state: &mut ConsoleState, action: UserAction) -> Vec<ConsoleEffect> {
    if !state.is_accepting() {
        tracing::trace!(?action, "input frozen while revealing");
        return Vec::new();
    }

    match action {
        UserAction::InputChar(ch) => {
            if ch.is_control() {
                return Vec::new();
            }
            state.input.push(ch);
            vec![ConsoleEffect::RequestFrame]
        }
        UserAction::InputPaste(text) => {
            state
                .input
                .extend(text.chars().filter(|ch| !ch.is_control()));
            vec![ConsoleEffect::RequestFrame]
        }
        UserAction::InputBackspace => {
            state.input.pop();
            vec![ConsoleEffect::RequestFrame]
        }
        UserAction::Submit => submit(state),
        UserAction::HistoryPrevious => match state.history.recall_previous() {
            Some(text) => {
                state.input = text;
                vec![ConsoleEffect::RequestFrame]
            }
            None => Vec::new(),
        },
        UserAction::HistoryNext => match state.history.recall_next() {
            Some(text) => {
                state.input = text;
                vec![ConsoleEffect::RequestFrame]
            }
            None => Vec::new(),
        },
    }
}

fn submit(state: &mut ConsoleState) -> Vec<ConsoleEffect> {
    if state.input.trim().is_empty() {
        return Vec::new();
    }

    let input = std::mem::take(&mut state.input);
    state.history.reset_cursor();
    let resolution = state.registry.resolve(&input);
    let control = resolution.dispatch.control();
    tracing::debug!(
        command = %resolution.normalized,
        dispatch = ?resolution.dispatch,
        "console submit"
    );

    match control {
        Some(ControlSignal::ClearScreen) => {
            abandon_reveal(state);
            state.transcript.clear();
            return vec![ConsoleEffect::RequestFrame];
        }
        Some(ControlSignal::NavigateLanding) => {
            tracing::info!(route = NavigationTarget::Landing.label(), "navigation requested");
            return vec![
                ConsoleEffect::Navigate(NavigationTarget::Landing),
                ConsoleEffect::RequestFrame,
            ];
        }
        Some(ControlSignal::MatrixOverlay)
        | Some(ControlSignal::SwitchToAlternateUi)
        | None => {}
    }

    if resolution.dispatch.is_recordable() {
        state.history.record(input.clone());
    }

    let mut effects = Vec::new();
    if control == Some(ControlSignal::MatrixOverlay) {
        let timer_id = state.allocate_timer_id();
        state.matrix = MatrixOverlay {
            active: true,
            timer_id: Some(timer_id),
        };
        effects.push(ConsoleEffect::SetMatrixOverlay(true));
        effects.push(ConsoleEffect::ScheduleMatrixClear {
            timer_id,
            after_ms: state.settings.matrix_duration_ms,
        });
    }

    abandon_reveal(state);
    let engine = Reveal::new(&resolution.payload, state.settings.chars_per_tick);
    let entry_id = state.transcript.push(
        EntryInput::Command(input),
        resolution.payload,
        RevealState::Revealing,
    );
    let reveal_id = state.allocate_reveal_id();
    state.reveal = Some(ActiveReveal {
        reveal_id,
        entry_id,
        dispatch: resolution.dispatch,
        engine,
    });
    state.phase = ConsolePhase::Dispatching;

    effects.push(ConsoleEffect::ScheduleRevealTick {
        reveal_id,
        after_ms: state.settings.tick_interval_ms,
    });
    effects.push(ConsoleEffect::RequestFrame);
    effects
}

fn reduce_runtime(state: &mut ConsoleState, action: RuntimeAction) -> Vec<ConsoleEffect> {
    match action {
        RuntimeAction::RevealTick { reveal_id } => {
            let tick_interval_ms = state.settings.tick_interval_ms;
            let Some(active) = state.reveal.as_mut() else {
                return Vec::new();
            };
            if active.reveal_id != reveal_id {
                return Vec::new();
            }
            match active.engine.tick() {
                Some(RevealFrame::Partial(_)) => vec![
                    ConsoleEffect::ScheduleRevealTick {
                        reveal_id,
                        after_ms: tick_interval_ms,
                    },
                    ConsoleEffect::RequestFrame,
                ],
                Some(RevealFrame::Complete) => complete_reveal(state),
                None => Vec::new(),
            }
        }
        RuntimeAction::GuiRedirectDue { timer_id } => {
            if state.pending_gui_redirect != Some(timer_id) {
                return Vec::new();
            }
            state.pending_gui_redirect = None;
            tracing::info!(
                route = NavigationTarget::AlternateUi.label(),
                "navigation requested"
            );
            vec![ConsoleEffect::Navigate(NavigationTarget::AlternateUi)]
        }
        RuntimeAction::MatrixExpired { timer_id } => {
            if state.matrix.timer_id != Some(timer_id) {
                return Vec::new();
            }
            state.matrix = MatrixOverlay::default();
            vec![
                ConsoleEffect::SetMatrixOverlay(false),
                ConsoleEffect::RequestFrame,
            ]
        }
    }
}

/// Natural completion: the only path that fires the completion signal and
/// the delayed `gui` redirect.
fn complete_reveal(state: &mut ConsoleState) -> Vec<ConsoleEffect> {
    let Some(active) = state.reveal.take() else {
        return Vec::new();
    };
    state.phase = ConsolePhase::Idle;
    if !state.transcript.settle(active.entry_id) {
        return vec![ConsoleEffect::RequestFrame];
    }

    let mut effects = vec![
        ConsoleEffect::RevealCompleted(active.entry_id),
        ConsoleEffect::RequestFrame,
    ];
    if active.dispatch.control() == Some(ControlSignal::SwitchToAlternateUi) {
        let timer_id = state.allocate_timer_id();
        state.pending_gui_redirect = Some(timer_id);
        effects.push(ConsoleEffect::ScheduleGuiRedirect {
            timer_id,
            after_ms: state.settings.gui_redirect_delay_ms,
        });
    }
    effects
}

/// Cancels the in-flight reveal, if any, and settles its entry without a
/// completion signal. Only superseding actions (clear, a new submit) get here.
fn abandon_reveal(state: &mut ConsoleState) {
    let Some(mut active) = state.reveal.take() else {
        return;
    };
    active.engine.cancel();
    state.transcript.settle(active.entry_id);
    state.phase = ConsolePhase::Idle;
    tracing::trace!(entry = active.entry_id.0, "reveal superseded");
}

#[cfg(test)]
mod tests;
