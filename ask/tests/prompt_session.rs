// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Whole sessions driven by scripted input. Each item of a script is one `read()` from
//! the terminal.

use std::time::Duration;

use futures_util::FutureExt;
use pretty_assertions::assert_eq;
use r3bl_ask::{AnswerValue, Ask, AskError, ByteChunk, ByteChunkResult, Choice, InputDevice,
               OutputDevice, Question, SessionOutcome, Theme};
use r3bl_test_fixtures::{StdoutMock, gen_input_stream_with_delays};
use serde_json::json;

const UP: &str = "\x1b[A";
const DOWN: &str = "\x1b[B";
const RIGHT: &str = "\x1b[C";
const ENTER: &str = "\r";
const ESC: &str = "\x1b";
const CTRL_C: &str = "\x03";
const BACKSPACE: &str = "\x7f";

fn new_ask(chunks: Vec<&'static str>) -> (Ask, StdoutMock) {
    let stdout_mock = StdoutMock::default();
    let ask = Ask::new(
        InputDevice::new_mock_from_chunks(chunks),
        OutputDevice::new_mock(stdout_mock.clone()),
        Theme::plain(),
    );
    (ask, stdout_mock)
}

fn new_timed_ask(script: Vec<(u64, &'static str)>) -> (Ask, StdoutMock) {
    let it = gen_input_stream_with_delays(
        script
            .into_iter()
            .map(|(delay_ms, text)| {
                (
                    Duration::from_millis(delay_ms),
                    ByteChunkResult::Ok(ByteChunk::from_slice(text.as_bytes())),
                )
            })
            .collect(),
    );
    let stdout_mock = StdoutMock::default();
    let ask = Ask::new(
        InputDevice::new_mock(it),
        OutputDevice::new_mock(stdout_mock.clone()),
        Theme::plain(),
    );
    (ask, stdout_mock)
}

fn letters(messages: &[&str]) -> Vec<Choice> {
    messages.iter().map(|&it| Choice::from_message(it)).collect()
}

#[tokio::test]
async fn test_select_moves_down_twice_and_submits() {
    let (mut ask, stdout_mock) = new_ask(vec![DOWN, DOWN, ENTER]);
    let answer = ask
        .ask(Question::select("letter", letters(&["A", "B", "C"])).message("Pick"))
        .await
        .unwrap();

    assert_eq!(answer, Some(AnswerValue::Choice(json!("C"))));
    assert!(
        stdout_mock
            .get_copy_of_buffer_as_string_strip_ansi()
            .ends_with("  ? Pick: C\n")
    );
}

#[tokio::test]
async fn test_text_and_enter_in_one_read() {
    let (mut ask, _stdout_mock) = new_ask(vec!["ab\r"]);
    let answer = ask.ask(Question::input("name")).await.unwrap();
    assert_eq!(answer, Some(AnswerValue::Text("ab".into())));
}

#[tokio::test]
async fn test_two_arrows_in_one_read_move_twice() {
    let (mut ask, _stdout_mock) = new_ask(vec!["\x1b[B\x1b[B", ENTER]);
    let answer = ask
        .ask(Question::select("letter", letters(&["A", "B", "C"])))
        .await
        .unwrap();
    assert_eq!(answer, Some(AnswerValue::Choice(json!("C"))));
}

#[tokio::test]
async fn test_typeahead_carries_over_to_the_next_question() {
    let (mut ask, _stdout_mock) = new_ask(vec!["Ada\ry\r"]);
    let outcome = ask
        .prompt(&[Question::input("name"), Question::confirm("sure")])
        .await
        .unwrap();
    assert_eq!(
        outcome.answers().unwrap().to_json(),
        json!({ "name": "Ada", "sure": true })
    );
}

#[tokio::test]
async fn test_piped_lines_answer_each_question() {
    let (mut ask, _stdout_mock) = new_ask(vec!["Ada\r\n36\n"]);
    let outcome = ask
        .prompt(&[Question::input("name"), Question::number("age")])
        .await
        .unwrap();
    assert_eq!(
        outcome.answers().unwrap().to_json(),
        json!({ "name": "Ada", "age": 36 })
    );
}

#[tokio::test]
async fn test_grid_select_wraps_to_first_column() {
    let (mut ask, _stdout_mock) = new_ask(vec![DOWN, DOWN, DOWN, ENTER]);
    let question = Question::select(
        "digit",
        letters(&["0", "1", "2", "3", "4", "5", "6"]),
    )
    .columns(3);

    let answer = ask.ask(question).await.unwrap();
    assert_eq!(answer, Some(AnswerValue::Choice(json!("0"))));
}

#[tokio::test]
async fn test_grid_select_up_from_first_row() {
    let (mut ask, _stdout_mock) = new_ask(vec![RIGHT, UP, ENTER]);
    let question = Question::select(
        "digit",
        letters(&["0", "1", "2", "3", "4", "5", "6"]),
    )
    .columns(3);

    // Column 1 has no item on the last row, so up lands one row higher.
    let answer = ask.ask(question).await.unwrap();
    assert_eq!(answer, Some(AnswerValue::Choice(json!("4"))));
}

#[tokio::test]
async fn test_masked_password_never_echoes_secret() {
    let (mut ask, stdout_mock) = new_ask(vec!["ab", BACKSPACE, "c", ENTER]);
    let answer = ask
        .ask(Question::password("secret").message("Password"))
        .await
        .unwrap();

    assert_eq!(answer, Some(AnswerValue::Text("ac".into())));
    let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert!(output.ends_with("  ? Password: ••\n"));
    assert!(!output.contains("ac"));
}

#[tokio::test]
async fn test_end_of_input_then_no_asks_again_from_scratch() {
    let (mut ask, stdout_mock) = new_ask(vec!["ab", "", "n", ENTER, "x", ENTER]);
    let answer = ask
        .ask(Question::input("name").message("Name"))
        .await
        .unwrap();

    assert_eq!(answer, Some(AnswerValue::Text("x".into())));
    assert!(
        stdout_mock
            .get_copy_of_buffer_as_string_strip_ansi()
            .contains("You pressed Ctrl-D. Do you want to exit? [y/n]: No\n")
    );
}

#[tokio::test]
async fn test_end_of_input_then_yes_aborts_session() {
    let (mut ask, _stdout_mock) = new_ask(vec!["ab", "\x04", "y", ENTER]);
    let result = ask.prompt(&[Question::input("name")]).await;
    assert!(matches!(result, Err(AskError::SessionAborted)));
}

#[tokio::test]
async fn test_input_that_ends_twice_aborts_session() {
    // The exit confirmation sees the same closed stream and takes its default.
    let (mut ask, _stdout_mock) = new_ask(vec![]);
    let result = ask.prompt(&[Question::input("name")]).await;
    assert!(matches!(result, Err(AskError::SessionAborted)));
}

#[tokio::test(start_paused = true)]
async fn test_double_ctrl_c_forces_termination() {
    let (mut ask, _stdout_mock) = new_timed_ask(vec![(0, "a"), (50, CTRL_C), (100, CTRL_C)]);
    let result = ask.prompt(&[Question::input("name")]).await;
    assert!(matches!(result, Err(AskError::ForcedTermination)));
}

#[tokio::test(start_paused = true)]
async fn test_slow_ctrl_c_abandons_session() {
    let (mut ask, stdout_mock) =
        new_timed_ask(vec![(0, CTRL_C), (500, CTRL_C), (1000, ENTER)]);
    let outcome = ask
        .prompt(&[Question::input("name"), Question::confirm("sure")])
        .await
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Abandoned);
    assert!(!stdout_mock.get_copy_of_buffer_as_string().contains("sure"));
}

#[tokio::test]
async fn test_escape_abandons_whole_session() {
    let (mut ask, _stdout_mock) = new_ask(vec!["Ada", ENTER, DOWN, ESC, ENTER]);
    let outcome = ask
        .prompt(&[
            Question::input("name"),
            Question::select("fruit", letters(&["kiwi", "fig"])),
            Question::confirm("sure"),
        ])
        .await
        .unwrap();
    assert_eq!(outcome, SessionOutcome::Abandoned);
}

#[tokio::test]
async fn test_default_is_returned_unchanged() {
    let (mut ask, _stdout_mock) = new_ask(vec![ENTER, ENTER, ENTER]);
    let outcome = ask
        .prompt(&[
            Question::input("name").default_value(AnswerValue::Text("Ada".into())),
            Question::number("age").default_value(AnswerValue::Integer(36)),
            Question::confirm("agree").default_value(AnswerValue::Bool(false)),
        ])
        .await
        .unwrap();

    let answers = outcome.answers().unwrap();
    assert_eq!(
        answers.to_json(),
        json!({ "name": "Ada", "age": 36, "agree": false })
    );
}

#[tokio::test]
async fn test_confirm_without_default_waits_for_a_key() {
    let (mut ask, _stdout_mock) = new_ask(vec![ENTER, "x", "Y", ENTER]);
    let answer = ask.ask(Question::confirm("sure")).await.unwrap();
    assert_eq!(answer, Some(AnswerValue::Bool(true)));
}

#[tokio::test]
async fn test_checkbox_skips_separator_and_disabled() {
    let (mut ask, stdout_mock) = new_ask(vec![" ", DOWN, " ", ENTER]);
    let question = Question::checkbox(
        "fruits",
        vec![
            Choice::new("apple", 1),
            Choice::separator("--"),
            Choice::new("kiwi", 2).disabled(),
            Choice::new("banana", 3),
        ],
    )
    .message("Fruits");

    let answer = ask.ask(question).await.unwrap();
    assert_eq!(answer, Some(AnswerValue::Choices(vec![json!(1), json!(3)])));
    assert!(
        stdout_mock
            .get_copy_of_buffer_as_string_strip_ansi()
            .ends_with("  ? Fruits: apple, banana\n")
    );
}

#[tokio::test]
async fn test_numeric_shortcut_picks_by_position() {
    let (mut ask, _stdout_mock) = new_ask(vec!["3"]);
    let question = Question::select(
        "fruit",
        vec![
            Choice::from_message("apple"),
            Choice::separator("--"),
            Choice::from_message("kiwi"),
            Choice::from_message("fig"),
        ],
    )
    .use_numbers(true);

    let answer = ask.ask(question).await.unwrap();
    assert_eq!(answer, Some(AnswerValue::Choice(json!("fig"))));
}

#[tokio::test]
async fn test_exhausted_attempts_fail_the_session() {
    let (mut ask, stdout_mock) = new_ask(vec!["abc", ENTER, "xyz", ENTER]);
    let question = Question::input("code")
        .validate(|answer| {
            let ok = answer.as_text() == Some("42");
            async move { Ok(ok) }.boxed()
        })
        .max_attempts(2);

    let result = ask.prompt(&[question]).await;
    assert!(matches!(
        result,
        Err(AskError::ValidationExhausted { name }) if name == "code"
    ));
    let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert_eq!(output.matches(">> Invalid answer, please try again.").count(), 2);
}

#[tokio::test]
async fn test_validator_error_message_is_shown() {
    let (mut ask, stdout_mock) = new_ask(vec!["no", ENTER, "ok", ENTER]);
    let question = Question::input("word").validate(|answer| {
        let result = if answer.as_text() == Some("ok") {
            Ok(true)
        } else {
            Err(miette::miette!("Say ok"))
        };
        async move { result }.boxed()
    });

    let answer = ask.ask(question).await.unwrap();
    assert_eq!(answer, Some(AnswerValue::Text("ok".into())));
    assert!(stdout_mock.get_copy_of_buffer_as_string().contains(">> Say ok\n"));
}

#[tokio::test]
async fn test_raw_mode_released_and_cursor_shown() {
    let (mut ask, stdout_mock) = new_ask(vec![DOWN, ESC]);
    let outcome = ask
        .prompt(&[Question::select("fruit", letters(&["kiwi", "fig"]))])
        .await
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Abandoned);
    assert!(!ask.input_device.raw_mode.is_raw());
    assert!(
        stdout_mock
            .get_copy_of_buffer_as_string()
            .ends_with("\x1b[?25h")
    );
}
