use std::path::PathBuf;

use quizdr::app::App;
use quizdr::config::Config;
use quizdr::quiz::grade::{DEFAULT_PASS_THRESHOLD, grade};
use quizdr::quiz::parse::parse_sheet;
use quizdr::quiz::state::QuizState;

fn row(cells: &[Option<&str>]) -> Vec<Option<String>> {
    cells.iter().map(|c| c.map(str::to_string)).collect()
}

/// A minimal worksheet: title row, then one arithmetic question with answers
/// in slots 0-3 and correctness letter "B" (slot 0).
fn arithmetic_rows() -> Vec<Vec<Option<String>>> {
    vec![
        row(&[Some("Quiz A")]),
        row(&[
            Some("What is 2+2?"),
            Some("3"),
            Some("4"),
            Some("5"),
            Some("6"),
            None,
            None,
            None,
            None,
            Some("B"),
            Some("Basic arithmetic"),
        ]),
    ]
}

fn fixed_app() -> App {
    let config = Config {
        shuffle_questions: false,
        shuffle_answers: false,
        ..Config::default()
    };
    App::new(config, PathBuf::from("unused.xlsx"))
}

#[test]
fn parse_select_submit_scores_full_marks() {
    let parsed = parse_sheet(&arithmetic_rows());
    assert_eq!(parsed.title, "Quiz A");
    assert_eq!(parsed.questions.len(), 1);

    // Letter "B" marks slot 0, which holds "3".
    let question = &parsed.questions[0];
    assert_eq!(question.answers.len(), 4);
    assert!(question.answers[0].correct);
    assert!(!question.answers[1].correct);

    let mut state = QuizState::new();
    state.reset(parsed.title, parsed.questions);
    state.toggle_answer(0, "3");

    let summary = grade(&state, DEFAULT_PASS_THRESHOLD);
    assert_eq!(summary.message(), "You scored 100%. Pass");
}

#[test]
fn wrong_selection_scores_zero() {
    let parsed = parse_sheet(&arithmetic_rows());
    let mut state = QuizState::new();
    state.reset(parsed.title, parsed.questions);
    state.toggle_answer(0, "4");

    let summary = grade(&state, DEFAULT_PASS_THRESHOLD);
    assert_eq!(summary.message(), "You scored 0%. Fail");
}

#[test]
fn app_drives_the_same_flow_through_the_cursor() {
    let mut app = fixed_app();
    app.install(parse_sheet(&arithmetic_rows()));

    // Cursor starts on the first answer row ("3"); select and submit.
    app.toggle_current();
    app.submit();
    let summary = app.summary.expect("submit produces a summary");
    assert_eq!(summary.percent, 100);
    assert!(summary.passed);
    assert!(app.state.submitted);
}

#[test]
fn resubmission_recomputes_but_inputs_stay_locked() {
    let mut app = fixed_app();
    app.install(parse_sheet(&arithmetic_rows()));
    app.submit();
    assert_eq!(app.summary.unwrap().percent, 0);

    // Inputs are locked; selecting after submit must not change the score.
    app.toggle_current();
    app.submit();
    assert_eq!(app.summary.unwrap().percent, 0);
}

#[test]
fn reloading_the_same_sheet_starts_a_fresh_session() {
    let mut app = fixed_app();
    app.install(parse_sheet(&arithmetic_rows()));
    app.toggle_current();
    app.submit();
    assert!(app.state.submitted);

    app.install(parse_sheet(&arithmetic_rows()));
    assert!(!app.state.submitted);
    assert!(app.summary.is_none());
    assert!(app.state.selections.is_empty());
}

#[test]
fn multi_select_question_requires_exact_set() {
    let rows = vec![
        row(&[Some("Quiz B")]),
        row(&[
            Some("Pick the primes"),
            Some("2"),
            Some("3"),
            Some("4"),
            None,
            None,
            None,
            None,
            None,
            Some("B,C"),
            None,
        ]),
    ];
    let parsed = parse_sheet(&rows);
    assert!(parsed.questions[0].is_multi_select());

    let mut state = QuizState::new();
    state.reset(parsed.title, parsed.questions);
    state.toggle_answer(0, "2");
    assert_eq!(grade(&state, DEFAULT_PASS_THRESHOLD).percent, 0);

    state.toggle_answer(0, "3");
    assert_eq!(grade(&state, DEFAULT_PASS_THRESHOLD).percent, 100);

    state.toggle_answer(0, "4");
    assert_eq!(grade(&state, DEFAULT_PASS_THRESHOLD).percent, 0);
}

#[test]
fn shuffled_install_still_grades_by_text() {
    // Shuffling on: question and answer order is arbitrary, but selection and
    // grading key on text, so picking every correct text still scores 100%.
    let config = Config::default();
    assert!(config.shuffle_questions && config.shuffle_answers);
    let mut app = App::new(config, PathBuf::from("unused.xlsx"));

    let rows = vec![
        row(&[Some("Quiz C")]),
        row(&[
            Some("q one"),
            Some("alpha"),
            Some("beta"),
            None,
            None,
            None,
            None,
            None,
            None,
            Some("B"),
            None,
        ]),
        row(&[
            Some("q two"),
            Some("gamma"),
            Some("delta"),
            None,
            None,
            None,
            None,
            None,
            None,
            Some("C"),
            None,
        ]),
    ];
    app.install(parse_sheet(&rows));

    for idx in 0..app.state.questions.len() {
        let correct: Vec<String> = app.state.questions[idx]
            .correct_texts()
            .into_iter()
            .map(str::to_string)
            .collect();
        for text in correct {
            app.state.toggle_answer(idx, &text);
        }
    }
    app.submit();
    assert_eq!(app.summary.unwrap().percent, 100);
}
