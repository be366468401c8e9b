//! Parser for the tagged quiz format requested from the model.
//!
//! ```text
//! [Q1] statement
//! [A] option
//! [B] option
//! [C] option
//! [D] option
//! [ANSWER] B
//! ---
//! [Q2] ...
//! ```

use thiserror::Error;

/// Questions requested per quiz.
pub const QUESTION_COUNT: usize = 5;

/// Line separating question blocks.
pub const BLOCK_SEPARATOR: &str = "---";

pub const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub number: usize,
    pub statement: String,
    pub options: [String; 4],
    pub answer: char,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizFormatError {
    #[error("expected {expected} questions, found {found}")]
    QuestionCount { expected: usize, found: usize },

    #[error("question {question} is missing the {tag} field")]
    MissingField { question: usize, tag: &'static str },

    #[error("question {question} has invalid answer '{value}'")]
    InvalidAnswer { question: usize, value: String },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Statement,
    Choice(usize),
    Answer,
}

/// Splits `[TAG] rest` into `("TAG", "rest")`.
fn split_tag(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('[')?;
    let end = rest.find(']')?;
    Some((&rest[..end], rest[end + 1..].trim()))
}

fn field_for(tag: &str) -> Option<(Field, Option<usize>)> {
    match tag {
        "A" => Some((Field::Choice(0), None)),
        "B" => Some((Field::Choice(1), None)),
        "C" => Some((Field::Choice(2), None)),
        "D" => Some((Field::Choice(3), None)),
        "ANSWER" => Some((Field::Answer, None)),
        _ => {
            let number = tag.strip_prefix('Q')?.parse().ok()?;
            Some((Field::Statement, Some(number)))
        }
    }
}

fn parse_answer(question: usize, value: &str) -> Result<char, QuizFormatError> {
    let invalid = || QuizFormatError::InvalidAnswer {
        question,
        value: value.to_string(),
    };

    let mut chars = value.trim().chars();
    let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
    let standalone = chars.next().map_or(true, |c| !c.is_alphanumeric());

    if OPTION_LETTERS.contains(&letter) && standalone {
        Ok(letter)
    } else {
        Err(invalid())
    }
}

fn parse_block(position: usize, block: &[&str]) -> Result<QuizQuestion, QuizFormatError> {
    let mut number = None;
    let mut statement: Option<String> = None;
    let mut options: [Option<String>; 4] = Default::default();
    let mut answer: Option<String> = None;
    let mut current: Option<Field> = None;

    for line in block.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
        let Some((field, tagged_number, value)) = split_tag(line)
            .and_then(|(tag, value)| field_for(tag).map(|(f, n)| (f, n, value)))
        else {
            // Untagged lines continue the previous field.
            let slot = match current {
                Some(Field::Statement) => statement.as_mut(),
                Some(Field::Choice(i)) => options[i].as_mut(),
                Some(Field::Answer) | None => None,
            };
            if let Some(text) = slot {
                text.push(' ');
                text.push_str(line);
            }
            continue;
        };

        match field {
            Field::Statement => {
                number = tagged_number;
                statement = Some(value.to_string());
            }
            Field::Choice(i) => options[i] = Some(value.to_string()),
            Field::Answer => answer = Some(value.to_string()),
        }
        current = Some(field);
    }

    let missing = |tag| QuizFormatError::MissingField {
        question: position,
        tag,
    };

    let statement = statement
        .filter(|s| !s.is_empty())
        .ok_or_else(|| missing("[Q#]"))?;
    let [a, b, c, d] = options;
    let options = [
        a.ok_or_else(|| missing("[A]"))?,
        b.ok_or_else(|| missing("[B]"))?,
        c.ok_or_else(|| missing("[C]"))?,
        d.ok_or_else(|| missing("[D]"))?,
    ];
    let answer = answer.ok_or_else(|| missing("[ANSWER]"))?;

    Ok(QuizQuestion {
        number: number.unwrap_or(position),
        statement,
        options,
        answer: parse_answer(position, &answer)?,
    })
}

/// Parses a generated quiz into exactly `QUESTION_COUNT` questions.
pub fn parse_quiz(text: &str) -> Result<Vec<QuizQuestion>, QuizFormatError> {
    let mut blocks: Vec<Vec<&str>> = vec![Vec::new()];
    for line in text.lines() {
        if line.trim() == BLOCK_SEPARATOR {
            blocks.push(Vec::new());
        } else if let Some(block) = blocks.last_mut() {
            block.push(line);
        }
    }
    blocks.retain(|block| block.iter().any(|line| !line.trim().is_empty()));

    if blocks.len() != QUESTION_COUNT {
        return Err(QuizFormatError::QuestionCount {
            expected: QUESTION_COUNT,
            found: blocks.len(),
        });
    }

    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| parse_block(i + 1, block))
        .collect()
}
