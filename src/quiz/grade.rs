use std::collections::HashSet;

use crate::quiz::parse::Question;
use crate::quiz::state::QuizState;

/// Minimum percentage for a passing verdict, unless overridden in config.
pub const DEFAULT_PASS_THRESHOLD: u32 = 70;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GradeSummary {
    pub correct: usize,
    pub total: usize,
    pub percent: u32,
    pub passed: bool,
}

impl GradeSummary {
    pub fn message(&self) -> String {
        let verdict = if self.passed { "Pass" } else { "Fail" };
        format!("You scored {}%. {}", self.percent, verdict)
    }
}

/// Grade the whole quiz against the current selections.
///
/// Pure read of the state: callers may grade repeatedly (re-submission
/// recomputes) and the submitted flag is managed by the caller.
pub fn grade(state: &QuizState, pass_threshold: u32) -> GradeSummary {
    let total = state.questions.len();
    let correct = state
        .questions
        .iter()
        .enumerate()
        .filter(|&(idx, q)| question_correct(q, state.selected_texts(idx)))
        .count();

    let percent = if total == 0 {
        0
    } else {
        (correct as f64 / total as f64 * 100.0).round() as u32
    };

    GradeSummary {
        correct,
        total,
        percent,
        passed: percent >= pass_threshold,
    }
}

/// A question scores iff the selected-text set equals the correct-text set.
/// Subsets, supersets and disjoint picks all score zero; a question with no
/// correct answers marked can never score.
fn question_correct(question: &Question, selected: Option<&HashSet<String>>) -> bool {
    let want = question.correct_texts();
    if want.is_empty() {
        return false;
    }
    let Some(selected) = selected else {
        return false;
    };
    selected.len() == want.len() && selected.iter().all(|text| want.contains(text.as_str()))
}

/// Post-submit visual classification of one rendered answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerMark {
    Correct,
    Incorrect,
    Missed,
}

/// Display-only: the mark never feeds back into the score.
pub fn answer_mark(selected: bool, correct: bool) -> Option<AnswerMark> {
    match (selected, correct) {
        (true, true) => Some(AnswerMark::Correct),
        (true, false) => Some(AnswerMark::Incorrect),
        (false, true) => Some(AnswerMark::Missed),
        (false, false) => None,
    }
}
