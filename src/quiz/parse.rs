use std::collections::HashSet;

/// Number of answer slots per question row (columns 1-8).
pub const ANSWER_SLOTS: usize = 8;

const PROMPT_COL: usize = 0;
const CORRECT_COL: usize = 9;
const EXPLANATION_COL: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub answers: Vec<Answer>,
    pub explanation: String,
}

impl Question {
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.correct).count()
    }

    pub fn correct_texts(&self) -> HashSet<&str> {
        self.answers
            .iter()
            .filter(|a| a.correct)
            .map(|a| a.text.as_str())
            .collect()
    }

    /// Exactly one correct answer renders as radio buttons; any other count,
    /// including zero, as checkboxes.
    pub fn is_multi_select(&self) -> bool {
        self.correct_count() != 1
    }

    /// A row with no decodable correctness letters produces a question that
    /// can never be scored correct. Data-quality condition, not a parse error.
    pub fn is_unanswerable(&self) -> bool {
        self.correct_count() == 0
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParsedSheet {
    pub title: String,
    pub questions: Vec<Question>,
}

/// Parse decoded worksheet rows into a quiz.
///
/// Row 0 cell 0 is the quiz title; every following non-empty row is one
/// question. Rows with no cell values at all are skipped (spreadsheet
/// decoders emit gap rows for blank lines in the sheet).
pub fn parse_sheet(rows: &[Vec<Option<String>>]) -> ParsedSheet {
    let title = rows
        .first()
        .and_then(|row| row.first())
        .and_then(|cell| cell.clone())
        .unwrap_or_default();

    let questions = rows
        .iter()
        .skip(1)
        .filter(|row| row.iter().any(|cell| cell.is_some()))
        .map(|row| parse_question_row(row))
        .collect();

    ParsedSheet { title, questions }
}

/// Parse one question row: prompt, up to eight answer slots, correctness
/// letters, explanation.
///
/// Empty answer slots are dropped, which shifts positions in the resulting
/// list. Correctness is therefore decided against the original slot index
/// before compaction and carried on each surviving answer.
pub fn parse_question_row(row: &[Option<String>]) -> Question {
    let cell = |idx: usize| row.get(idx).and_then(|c| c.as_deref());

    let prompt = cell(PROMPT_COL).unwrap_or_default().to_string();
    let correct_slots = cell(CORRECT_COL)
        .map(decode_correct_slots)
        .unwrap_or_default();

    let mut answers = Vec::new();
    for slot in 0..ANSWER_SLOTS {
        let Some(text) = cell(1 + slot) else { continue };
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        answers.push(Answer {
            text: text.to_string(),
            correct: correct_slots.contains(&slot),
        });
    }

    let explanation = cell(EXPLANATION_COL).unwrap_or_default().to_string();

    Question {
        prompt,
        answers,
        explanation,
    }
}

/// Decode a correctness cell ("B,D") into 0-based answer slots.
///
/// Letter 'B' marks slot 0, 'C' slot 1, ... 'I' slot 7. Codes are trimmed and
/// uppercased first; anything outside B-I decodes to no slot.
pub fn decode_correct_slots(cell: &str) -> HashSet<usize> {
    cell.split(',')
        .filter_map(|code| code.trim().to_uppercase().chars().next())
        .filter_map(|letter| usize::try_from(letter as i32 - 'B' as i32).ok())
        .filter(|&slot| slot < ANSWER_SLOTS)
        .collect()
}
