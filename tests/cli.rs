//! Runs the `streamdrain-cat` binary with piped stdin, covering the stdin
//! tokenizers and the stdout drainer together.

use assert_cmd::Command;
use predicates::prelude::*;

fn cat() -> Command {
    Command::cargo_bin("streamdrain-cat").unwrap()
}

#[test]
fn test_lines_pass_through() {
    cat()
        .write_stdin("one two\nthree\r\nfour")
        .assert()
        .success()
        .stdout("one two\nthree\nfour\n");
}

#[test]
fn test_words_one_per_line() {
    cat()
        .args(["--split", "words"])
        .write_stdin("one two\n  three\tfour\n")
        .assert()
        .success()
        .stdout("one\ntwo\nthree\nfour\n");
}

#[test]
fn test_chars_one_per_line() {
    cat()
        .args(["-s", "chars"])
        .write_stdin("añ€")
        .assert()
        .success()
        .stdout("a\nñ\n€\n");
}

#[test]
fn test_small_queue_and_buffer_keep_order() {
    let input: String = (0..500).map(|i| format!("line {i}\n")).collect();
    cat()
        .args(["--capacity", "1", "--buffer-size", "8"])
        .write_stdin(input.clone())
        .assert()
        .success()
        .stdout(input);
}

#[test]
fn test_empty_stdin_writes_nothing() {
    cat().write_stdin("").assert().success().stdout("");
}

#[test]
fn test_invalid_utf8_fails_after_earlier_tokens() {
    cat()
        .args(["--split", "words"])
        .write_stdin(b"alpha beta \xff\n".to_vec())
        .assert()
        .failure()
        .stdout("alpha\nbeta\n")
        .stderr(predicate::str::contains("InvalidUtf8"));
}

#[test]
fn test_unknown_split_is_rejected() {
    cat()
        .args(["--split", "sentences"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
