use maze_game_rendering::DialogButton;
use maze_game_rendering_macroquad::DialogInputState;

fn run_sequence(sequence: &[Option<DialogButton>]) -> Vec<(bool, bool)> {
    let mut state = DialogInputState::default();
    let mut observed = Vec::new();
    for click in sequence {
        observed.push((state.take_new_game(), state.take_exit()));
        if let Some(button) = click {
            state.register(*button);
        }
    }

    // Flush any trailing latched click so the harness observes the final action.
    observed.push((state.take_new_game(), state.take_exit()));
    observed
}

#[test]
fn dialog_click_sequence_is_deterministic() {
    let clicks = [
        None,
        Some(DialogButton::NewGame),
        None,
        Some(DialogButton::NewGame),
        Some(DialogButton::Exit),
        None,
    ];
    let expected = vec![
        (false, false),
        (false, false),
        (true, false),
        (false, false),
        (true, false),
        (false, true),
        (false, false),
    ];

    let first_run = run_sequence(&clicks);
    let second_run = run_sequence(&clicks);

    assert_eq!(first_run, expected);
    assert_eq!(first_run, second_run);
}

#[test]
fn repeated_clicks_within_a_frame_fire_once() {
    let mut state = DialogInputState::default();
    state.register(DialogButton::NewGame);
    state.register(DialogButton::NewGame);

    assert!(state.take_new_game());
    assert!(!state.take_new_game());
}
