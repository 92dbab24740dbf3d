use super::*;
use pretty_assertions::assert_eq;

#[test]
fn help_in_caps_is_dispatched_and_recorded_raw() {
    let mut state = state();
    let effects = submit(&mut state, "HELP");

    assert_eq!(state.transcript.len(), 2);
    let entry = state.transcript.last().unwrap();
    assert_eq!(entry.input, EntryInput::Command("HELP".to_string()));
    assert_eq!(entry.reveal_state(), RevealState::Revealing);
    assert!(entry.output.flatten().starts_with("Available commands:\n• gui - Switch to GUI Interface"));
    assert_eq!(state.history.entries(), ["HELP"]);
    assert_eq!(state.phase, ConsolePhase::Dispatching);
    assert!(state.input.is_empty());
    assert!(matches!(
        effects.as_slice(),
        [
            ConsoleEffect::ScheduleRevealTick { after_ms: 15, .. },
            ConsoleEffect::RequestFrame
        ]
    ));
}

#[test]
fn unknown_command_is_a_normal_entry_and_recorded() {
    let mut state = state();
    submit_and_settle(&mut state, "foo");

    let entry = state.transcript.last().unwrap();
    assert_eq!(
        entry.output.flatten(),
        "Command not found: foo\nType 'help' for available commands."
    );
    assert!(entry.is_settled());
    assert_eq!(state.history.entries(), ["foo"]);
}

#[test]
fn skills_entry_renders_proportional_bar() {
    let mut content = PortfolioContent::sample();
    content.skills = SkillSet {
        frontend: vec![Skill::new("React", 95)],
        ..SkillSet::default()
    };
    let mut state = state_with(content);
    submit_and_settle(&mut state, "skills");

    let text = state.transcript.last().unwrap().output.flatten();
    assert!(text.contains("React █████████░ 95%"), "{text}");
}

#[test]
fn whitespace_submission_is_ignored() {
    let mut state = state();
    type_text(&mut state, "   ");
    let effects = run_user(&mut state, UserAction::Submit);

    assert!(effects.is_empty());
    assert_eq!(state.transcript.len(), 1);
    assert!(state.history.is_empty());
    assert_eq!(state.input, "   ");
    assert_eq!(state.phase, ConsolePhase::Idle);
}

#[test]
fn editing_builds_the_input_buffer() {
    let mut state = state();
    for ch in "abx".chars() {
        run_user(&mut state, UserAction::InputChar(ch));
    }
    run_user(&mut state, UserAction::InputBackspace);
    run_user(&mut state, UserAction::InputChar('\u{7}'));
    run_user(&mut state, UserAction::InputPaste("c\td".to_string()));
    assert_eq!(state.input, "abcd");
}

#[test]
fn custom_registered_command_dispatches() {
    let registry = CommandRegistry::new(Arc::new(PortfolioContent::sample())).with_command(
        "uses",
        "Gear I use",
        |_| OutputPayload::builder().text("A keyboard").build(),
    );
    let mut state = ConsoleState::new(registry, ConsoleSettings::default());
    submit_and_settle(&mut state, "USES");

    assert_eq!(state.transcript.last().unwrap().output.flatten(), "A keyboard");
    assert_eq!(state.history.entries(), ["USES"]);
}
