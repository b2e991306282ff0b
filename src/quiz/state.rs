use std::collections::{HashMap, HashSet};
use std::ops::Range;

use crate::quiz::parse::Question;

/// Questions shown per page. Fixed, not configurable.
pub const PAGE_SIZE: usize = 10;

/// All mutable session state for one loaded quiz.
///
/// Selections are keyed by the question's index in `questions` (stable for
/// the whole session, assigned after the load-time shuffle) and by answer
/// text within a question. On-page position is never used as a key, so
/// re-rendering or paging cannot lose selections.
#[derive(Debug, Default)]
pub struct QuizState {
    pub title: String,
    pub questions: Vec<Question>,
    pub selections: HashMap<usize, HashSet<String>>,
    pub current_page: usize,
    pub submitted: bool,
}

impl QuizState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh session. Prior selections, page position and the
    /// submitted flag are discarded unconditionally, even if the new
    /// question list is identical.
    pub fn reset(&mut self, title: String, questions: Vec<Question>) {
        self.title = title;
        self.questions = questions;
        self.selections.clear();
        self.current_page = 0;
        self.submitted = false;
    }

    pub fn page_count(&self) -> usize {
        self.questions.len().div_ceil(PAGE_SIZE)
    }

    /// Absolute question indices of the visible page.
    pub fn page_range(&self) -> Range<usize> {
        let start = self.current_page * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.questions.len());
        start..end.max(start)
    }

    pub fn visible_questions(&self) -> &[Question] {
        &self.questions[self.page_range()]
    }

    pub fn has_prev_page(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next_page(&self) -> bool {
        (self.current_page + 1) * PAGE_SIZE < self.questions.len()
    }

    /// Move to the previous page. Returns false at the first page.
    pub fn prev_page(&mut self) -> bool {
        if !self.has_prev_page() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Move to the next page. Returns false at the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next_page() {
            return false;
        }
        self.current_page += 1;
        true
    }

    pub fn selected_texts(&self, question: usize) -> Option<&HashSet<String>> {
        self.selections.get(&question)
    }

    pub fn is_selected(&self, question: usize, text: &str) -> bool {
        self.selections
            .get(&question)
            .is_some_and(|set| set.contains(text))
    }

    /// Apply a selection event to one answer.
    ///
    /// Single-select questions (exactly one correct answer) replace the prior
    /// selection wholesale; multi-select questions toggle membership of just
    /// this entry. Once submitted, all inputs are read-only.
    pub fn toggle_answer(&mut self, question: usize, text: &str) {
        if self.submitted {
            return;
        }
        let Some(q) = self.questions.get(question) else {
            return;
        };
        let multi = q.is_multi_select();
        let entry = self.selections.entry(question).or_default();
        if multi {
            if !entry.remove(text) {
                entry.insert(text.to_string());
            }
        } else {
            entry.clear();
            entry.insert(text.to_string());
        }
    }

    /// Number of selectable answer rows on the visible page. The cursor in
    /// the UI walks this flat sequence.
    pub fn answer_rows_on_page(&self) -> usize {
        self.visible_questions()
            .iter()
            .map(|q| q.answers.len())
            .sum()
    }

    /// Resolve a flat on-page cursor position to (absolute question index,
    /// answer text).
    pub fn answer_at(&self, cursor: usize) -> Option<(usize, &str)> {
        let mut remaining = cursor;
        for idx in self.page_range() {
            let answers = &self.questions[idx].answers;
            if remaining < answers.len() {
                return Some((idx, answers[remaining].text.as_str()));
            }
            remaining -= answers.len();
        }
        None
    }
}
