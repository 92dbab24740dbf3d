use std::sync::Arc;

pub(super) use super::reduce;
pub(super) use super::ConsoleEffect;
pub(super) use super::NavigationTarget;
pub(super) use crate::actions::ConsoleAction;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::actions::UserAction;
pub(super) use crate::command_registry::CommandRegistry;
pub(super) use crate::content::PortfolioContent;
pub(super) use crate::content::Skill;
pub(super) use crate::content::SkillSet;
pub(super) use crate::history::HistoryCursor;
pub(super) use crate::payload::OutputPayload;
pub(super) use crate::state::ConsolePhase;
pub(super) use crate::state::ConsoleSettings;
pub(super) use crate::state::ConsoleState;
pub(super) use crate::state::EntryInput;
pub(super) use crate::state::RevealState;

mod submit_dispatch;

fn state() -> ConsoleState {
    state_with(PortfolioContent::sample())
}

fn state_with(content: PortfolioContent) -> ConsoleState {
    ConsoleState::new(
        CommandRegistry::new(Arc::new(content)),
        ConsoleSettings::default(),
    )
}

fn run_user(state: &mut ConsoleState, action: UserAction) -> Vec<ConsoleEffect> {
    reduce(state, ConsoleAction::User(action))
}

fn run_runtime(state: &mut ConsoleState, action: RuntimeAction) -> Vec<ConsoleEffect> {
    reduce(state, ConsoleAction::Runtime(action))
}

fn type_text(state: &mut ConsoleState, text: &str) {
    run_user(state, UserAction::InputPaste(text.to_string()));
}

fn submit(state: &mut ConsoleState, text: &str) -> Vec<ConsoleEffect> {
    type_text(state, text);
    run_user(state, UserAction::Submit)
}

fn scheduled_tick(effects: &[ConsoleEffect]) -> Option<u64> {
    effects.iter().find_map(|effect| match effect {
        ConsoleEffect::ScheduleRevealTick { reveal_id, .. } => Some(*reveal_id),
        _ => None,
    })
}

/// Delivers reveal ticks until the reducer stops scheduling them and
/// returns every effect produced along the way.
fn drain_reveal(state: &mut ConsoleState, first: &[ConsoleEffect]) -> Vec<ConsoleEffect> {
    let mut all = Vec::new();
    let mut next = scheduled_tick(first);
    while let Some(reveal_id) = next {
        let effects = run_runtime(state, RuntimeAction::RevealTick { reveal_id });
        next = scheduled_tick(&effects);
        all.extend(effects);
    }
    all
}

/// Submits `text` and lets its reveal run to completion.
fn submit_and_settle(state: &mut ConsoleState, text: &str) -> Vec<ConsoleEffect> {
    let mut effects = submit(state, text);
    let rest = drain_reveal(state, &effects);
    effects.extend(rest);
    effects
}

fn completions(effects: &[ConsoleEffect]) -> usize {
    effects
        .iter()
        .filter(|effect| matches!(effect, ConsoleEffect::RevealCompleted(_)))
        .count()
}
