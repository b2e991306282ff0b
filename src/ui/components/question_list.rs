use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::quiz::content::{Fragment, parse_fragments};
use crate::quiz::grade::{AnswerMark, answer_mark};
use crate::quiz::state::QuizState;
use crate::ui::theme::Theme;

/// Widget for the visible page: prompts, answer rows with selection markers,
/// post-submit marks and explanations. Scrolls to keep the cursor row on
/// screen.
pub struct QuestionList<'a> {
    state: &'a QuizState,
    cursor: usize,
    theme: &'a Theme,
}

impl<'a> QuestionList<'a> {
    pub fn new(state: &'a QuizState, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            state,
            cursor,
            theme,
        }
    }

    /// Build all lines for the page and report which line holds the cursor.
    fn build_lines(&self) -> (Vec<Line<'static>>, usize) {
        let colors = &self.theme.colors;
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut cursor_line = 0;

        if self.state.questions.is_empty() {
            lines.push(Line::from(Span::styled(
                "No questions loaded.",
                Style::default().fg(colors.dim()),
            )));
            return (lines, 0);
        }

        let prompt_style = Style::default().fg(colors.fg());
        let image_style = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::ITALIC);
        let answer_style = if self.state.submitted {
            Style::default().fg(colors.dim())
        } else {
            Style::default().fg(colors.fg())
        };

        let mut row = 0;
        for idx in self.state.page_range() {
            let question = &self.state.questions[idx];

            let heading = Span::styled(
                format!("Q{}: ", idx + 1),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            );
            lines.extend(content_lines(
                &question.prompt,
                prompt_style,
                image_style,
                vec![heading],
                "    ",
            ));

            let multi = question.is_multi_select();
            for answer in &question.answers {
                let selected = self.state.is_selected(idx, &answer.text);
                let is_cursor_row = row == self.cursor;
                if is_cursor_row {
                    cursor_line = lines.len();
                }

                let row_style = if is_cursor_row {
                    Style::default().fg(colors.cursor_fg()).bg(colors.cursor_bg())
                } else {
                    answer_style
                };

                let marker = Span::styled(
                    format!("  {} ", selection_marker(multi, selected)),
                    row_style,
                );
                let mut answer_lines = content_lines(
                    &answer.text,
                    row_style,
                    if is_cursor_row { row_style } else { image_style },
                    vec![marker],
                    "      ",
                );

                if self.state.submitted {
                    if let Some(mark) = answer_mark(selected, answer.correct) {
                        let (tag, color) = mark_tag(mark, colors);
                        if let Some(first) = answer_lines.first_mut() {
                            first.push_span(Span::styled(
                                format!("  {tag}"),
                                Style::default().fg(color).add_modifier(Modifier::BOLD),
                            ));
                        }
                    }
                }

                lines.extend(answer_lines);
                row += 1;
            }

            if self.state.submitted && !question.explanation.trim().is_empty() {
                let label = Span::styled(
                    "  Explanation: ".to_string(),
                    Style::default()
                        .fg(colors.warning())
                        .add_modifier(Modifier::BOLD),
                );
                lines.extend(content_lines(
                    &question.explanation,
                    Style::default().fg(colors.fg()).add_modifier(Modifier::ITALIC),
                    image_style,
                    vec![label],
                    "    ",
                ));
            }

            lines.push(Line::from(""));
        }

        (lines, cursor_line)
    }
}

impl Widget for QuestionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let (lines, cursor_line) = self.build_lines();

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let view_height = block.inner(area).height as usize;

        // Scroll just far enough that the cursor row stays visible.
        let offset = if view_height > 0 && cursor_line >= view_height {
            cursor_line + 1 - view_height
        } else {
            0
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((offset as u16, 0));
        paragraph.render(area, buf);
    }
}

fn selection_marker(multi: bool, selected: bool) -> &'static str {
    match (multi, selected) {
        (false, false) => "( )",
        (false, true) => "(o)",
        (true, false) => "[ ]",
        (true, true) => "[x]",
    }
}

fn mark_tag(mark: AnswerMark, colors: &crate::ui::theme::ThemeColors) -> (&'static str, ratatui::style::Color) {
    match mark {
        AnswerMark::Correct => ("\u{2713} correct", colors.mark_correct()),
        AnswerMark::Incorrect => ("\u{2717} incorrect", colors.mark_incorrect()),
        AnswerMark::Missed => ("! missed", colors.mark_missed()),
    }
}

/// Turn a content string into display lines. The first line starts with
/// `prefix`; continuation lines are indented. Image fragments render as a
/// bracketed placeholder, since the terminal shows no bitmaps.
fn content_lines(
    content: &str,
    base: Style,
    image: Style,
    prefix: Vec<Span<'static>>,
    indent: &str,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans = prefix;
    let mut has_content = false;

    for fragment in parse_fragments(content) {
        match fragment {
            Fragment::Text(text) => {
                if has_content {
                    spans.push(Span::styled(" ".to_string(), base));
                }
                spans.push(Span::styled(text, base));
                has_content = true;
            }
            Fragment::Image(src) => {
                if has_content {
                    spans.push(Span::styled(" ".to_string(), base));
                }
                spans.push(Span::styled(format!("[img: {src}]"), image));
                has_content = true;
            }
            Fragment::LineBreak => {
                lines.push(Line::from(std::mem::take(&mut spans)));
                spans.push(Span::styled(indent.to_string(), base));
                has_content = false;
            }
        }
    }

    lines.push(Line::from(spans));
    lines
}
