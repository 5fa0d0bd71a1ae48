use std::process::Command;

fn maze_game() -> Command {
    Command::new(env!("CARGO_BIN_EXE_maze-game"))
}

#[test]
fn help_lists_the_maze_options() {
    let output = maze_game()
        .arg("--help")
        .output()
        .expect("failed to launch maze-game");

    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for flag in ["--width", "--height", "--seed", "--goal", "--maze-code"] {
        assert!(help.contains(flag), "help should mention {flag}");
    }
}

#[test]
fn zero_dimensions_exit_before_opening_a_window() {
    let output = maze_game()
        .args(["--quiet", "--width", "0"])
        .output()
        .expect("failed to launch maze-game");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid maze dimensions"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn oversized_mazes_exit_before_opening_a_window() {
    let output = maze_game()
        .args(["--quiet", "--width", "65535", "--height", "65535"])
        .output()
        .expect("failed to launch maze-game");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("too large"), "unexpected stderr: {stderr}");
}
