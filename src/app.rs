use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::config::Config;
use crate::quiz::grade::{self, GradeSummary};
use crate::quiz::parse::ParsedSheet;
use crate::quiz::sheet;
use crate::quiz::state::QuizState;
use crate::ui::theme::Theme;

/// Session orchestrator: owns the quiz state plus everything the render loop
/// needs (cursor, last grade, load errors, theme, config).
pub struct App {
    pub state: QuizState,
    /// Flat index over the answer rows of the visible page.
    pub cursor: usize,
    pub summary: Option<GradeSummary>,
    pub load_error: Option<String>,
    /// Questions with no correct answer marked; surfaced as a data-quality
    /// warning in the header rather than silently left unwinnable.
    pub unanswerable: usize,
    pub file: PathBuf,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, file: PathBuf) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        Self {
            state: QuizState::new(),
            cursor: 0,
            summary: None,
            load_error: None,
            unanswerable: 0,
            file,
            theme,
            config,
            should_quit: false,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Decode and install the quiz file. On decode failure the previous
    /// session stays intact and the error is kept for the header banner.
    pub fn load_file(&mut self) {
        match sheet::read_rows(&self.file) {
            Ok(rows) => {
                let parsed = crate::quiz::parse::parse_sheet(&rows);
                self.install(parsed);
            }
            Err(err) => {
                self.load_error = Some(err.to_string());
            }
        }
    }

    /// Start a new session from parsed questions. Shuffles once, up front:
    /// reshuffling answers on every redraw (as a browser form might) would
    /// reorder rows under the cursor on each keypress.
    pub fn install(&mut self, mut parsed: ParsedSheet) {
        if self.config.shuffle_questions {
            parsed.questions.shuffle(&mut self.rng);
        }
        if self.config.shuffle_answers {
            for question in &mut parsed.questions {
                question.answers.shuffle(&mut self.rng);
            }
        }

        self.unanswerable = parsed
            .questions
            .iter()
            .filter(|q| q.is_unanswerable())
            .count();
        self.state.reset(parsed.title, parsed.questions);
        self.cursor = 0;
        self.summary = None;
        self.load_error = None;
    }

    pub fn move_cursor_down(&mut self) {
        let rows = self.state.answer_rows_on_page();
        if rows > 0 && self.cursor + 1 < rows {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn prev_page(&mut self) {
        if self.state.prev_page() {
            self.cursor = 0;
        }
    }

    pub fn next_page(&mut self) {
        if self.state.next_page() {
            self.cursor = 0;
        }
    }

    /// Select or toggle the answer under the cursor. No-op after submit.
    pub fn toggle_current(&mut self) {
        if let Some((question, text)) = self.state.answer_at(self.cursor) {
            let text = text.to_string();
            self.state.toggle_answer(question, &text);
        }
    }

    /// Grade the current selections and lock the inputs. Idempotent: grading
    /// again recomputes the same summary from unchanged selections.
    pub fn submit(&mut self) {
        self.summary = Some(grade::grade(&self.state, self.config.pass_threshold));
        self.state.submitted = true;
    }

    pub fn reload(&mut self) {
        self.load_file();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::parse::{Answer, Question};

    fn sheet(questions: Vec<Question>) -> ParsedSheet {
        ParsedSheet {
            title: "Test".to_string(),
            questions,
        }
    }

    fn question(answers: &[(&str, bool)]) -> Question {
        Question {
            prompt: "q".to_string(),
            answers: answers
                .iter()
                .map(|(text, correct)| Answer {
                    text: text.to_string(),
                    correct: *correct,
                })
                .collect(),
            explanation: String::new(),
        }
    }

    fn app() -> App {
        let config = Config {
            shuffle_questions: false,
            shuffle_answers: false,
            ..Config::default()
        };
        App::new(config, PathBuf::from("unused.xlsx"))
    }

    #[test]
    fn test_cursor_clamps_to_page_rows() {
        let mut app = app();
        app.install(sheet(vec![question(&[("a", true), ("b", false)])]));
        app.move_cursor_down();
        app.move_cursor_down();
        app.move_cursor_down();
        assert_eq!(app.cursor, 1);
        app.move_cursor_up();
        app.move_cursor_up();
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_toggle_and_submit_flow() {
        let mut app = app();
        app.install(sheet(vec![question(&[("a", true), ("b", false)])]));
        app.toggle_current(); // cursor on "a"
        app.submit();
        let summary = app.summary.unwrap();
        assert_eq!(summary.percent, 100);
        assert!(app.state.submitted);
        // Locked: toggling the other answer changes nothing.
        app.move_cursor_down();
        app.toggle_current();
        assert!(!app.state.is_selected(0, "b"));
    }

    #[test]
    fn test_install_resets_submission_and_selections() {
        let mut app = app();
        let questions = vec![question(&[("a", true), ("b", false)])];
        app.install(sheet(questions.clone()));
        app.toggle_current();
        app.submit();
        assert!(app.state.submitted);

        // Identical content: still a fresh session.
        app.install(sheet(questions));
        assert!(!app.state.submitted);
        assert!(app.summary.is_none());
        assert!(app.state.selections.is_empty());
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_install_counts_unanswerable_questions() {
        let mut app = app();
        app.install(sheet(vec![
            question(&[("a", true)]),
            question(&[("a", false), ("b", false)]),
            question(&[("a", false)]),
        ]));
        assert_eq!(app.unanswerable, 2);
    }

    #[test]
    fn test_page_change_resets_cursor() {
        let mut app = app();
        let questions = (0..15).map(|_| question(&[("a", true), ("b", false)])).collect();
        app.install(sheet(questions));
        app.move_cursor_down();
        app.move_cursor_down();
        app.next_page();
        assert_eq!(app.cursor, 0);
        assert_eq!(app.state.current_page, 1);
        app.prev_page();
        assert_eq!(app.state.current_page, 0);
    }

    #[test]
    fn test_load_failure_keeps_prior_session() {
        let mut app = app();
        app.install(sheet(vec![question(&[("a", true)])]));
        app.toggle_current();

        app.file = PathBuf::from("/nonexistent/quiz.xlsx");
        app.reload();
        assert!(app.load_error.is_some());
        // Previous state untouched.
        assert_eq!(app.state.questions.len(), 1);
        assert!(app.state.is_selected(0, "a"));
    }
}
