use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn timer() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("timer");
    cmd.env("NO_COLOR", "1").env_remove("TIMER_FONT");
    cmd
}

#[test]
fn list_fonts_groups_by_height_and_exits_zero() {
    timer()
        .arg("--list-fonts")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Available fonts:"))
        .stdout(predicate::str::contains("NORMAL FONTS (1)"))
        .stdout(predicate::str::contains("  block"))
        .stdout(predicate::str::contains("12:34:56"));
}

#[test]
fn list_fonts_skips_font_validation() {
    timer()
        .args(["--list-fonts", "--font", "nope"])
        .assert()
        .success();
}

#[test]
fn unknown_font_is_rejected() {
    timer()
        .args(["--font", "nope", "5m"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid font 'nope'"));
}

#[test]
fn font_env_var_is_the_default() {
    timer()
        .env("TIMER_FONT", "comic")
        .arg("5m")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid font 'comic'"));
}

#[test]
fn missing_duration_is_rejected() {
    timer()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Please specify a timer duration"));

    timer()
        .arg("   ")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Please specify a timer duration"));
}

#[test]
fn garbage_duration_is_rejected_with_input_echoed() {
    timer()
        .arg("garbage")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid duration string: garbage"))
        .stderr(predicate::str::contains("__h__m__s"));
}

#[test]
fn reordered_duration_is_rejected() {
    timer()
        .arg("30m1h")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid duration string: 30m1h"));
}

#[test]
fn zero_duration_is_rejected() {
    timer()
        .arg("0h0m0s")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot be zero"));
}

#[test]
fn past_datetime_is_rejected() {
    timer()
        .arg("2000-01-01T00:00")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("in the past"));
}

#[test]
fn malformed_time_of_day_is_rejected() {
    timer()
        .arg("T99:99")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid time of day"));
}

#[test]
fn help_lists_example_usage() {
    timer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("timer T14:00"))
        .stdout(predicate::str::contains("--font digital"))
        .stdout(predicate::str::contains("--no-bell"));
}
