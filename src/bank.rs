use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use include_dir::{include_dir, Dir};
use itertools::Itertools;
use serde::Deserialize;
use thiserror::Error;

static BANK_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/banks");

const BUILTIN_BANK_FILE: &str = "sample.json";

/// Number of answer options every question carries.
pub const OPTIONS_PER_QUESTION: usize = 5;

/// One of the fixed answer labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum_macros::Display)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
    E,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; OPTIONS_PER_QUESTION] = [
        OptionLabel::A,
        OptionLabel::B,
        OptionLabel::C,
        OptionLabel::D,
        OptionLabel::E,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Maps the empty-string "no selection" sentinel to `None`.
    pub fn parse_selection(s: &str) -> Result<Option<OptionLabel>, ParseLabelError> {
        if s.is_empty() {
            Ok(None)
        } else {
            s.parse().map(Some)
        }
    }

    /// Keyboard shortcut for a label, accepting either case.
    pub fn from_key(c: char) -> Option<OptionLabel> {
        match c.to_ascii_uppercase() {
            'A' => Some(OptionLabel::A),
            'B' => Some(OptionLabel::B),
            'C' => Some(OptionLabel::C),
            'D' => Some(OptionLabel::D),
            'E' => Some(OptionLabel::E),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not one of A, B, C, D, E")]
pub struct ParseLabelError(pub String);

impl FromStr for OptionLabel {
    type Err = ParseLabelError;

    // Case-sensitive on purpose: "a" is not a label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(OptionLabel::A),
            "B" => Ok(OptionLabel::B),
            "C" => Ok(OptionLabel::C),
            "D" => Ok(OptionLabel::D),
            "E" => Ok(OptionLabel::E),
            other => Err(ParseLabelError(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum BankError {
    #[error("failed to read question bank {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("question bank is empty")]
    Empty,
    #[error("question id must be positive (found {0})")]
    InvalidId(u32),
    #[error("duplicate question id {0}")]
    DuplicateId(u32),
    #[error("question {id} is missing option {label}")]
    MissingOption { id: u32, label: OptionLabel },
    #[error("question {id} has unknown option label `{label}`")]
    UnknownOption { id: u32, label: String },
    #[error("question {id} has invalid correct answer `{value}`")]
    InvalidCorrectAnswer { id: u32, value: String },
}

/// Question as it appears on disk, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    pub id: u32,
    pub text: String,
    pub options: BTreeMap<String, String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: u32,
    pub text: String,
    options: [String; OPTIONS_PER_QUESTION],
    pub correct_answer: OptionLabel,
    pub explanation: Option<String>,
}

impl Question {
    pub fn option(&self, label: OptionLabel) -> &str {
        &self.options[label.index()]
    }

    pub fn options(&self) -> impl Iterator<Item = (OptionLabel, &str)> {
        OptionLabel::ALL
            .iter()
            .map(move |&label| (label, self.option(label)))
    }
}

impl TryFrom<RawQuestion> for Question {
    type Error = BankError;

    fn try_from(mut raw: RawQuestion) -> Result<Self, Self::Error> {
        let id = raw.id;
        if id == 0 {
            return Err(BankError::InvalidId(id));
        }

        if let Some(unknown) = raw
            .options
            .keys()
            .find(|key| key.parse::<OptionLabel>().is_err())
        {
            return Err(BankError::UnknownOption {
                id,
                label: unknown.clone(),
            });
        }

        let mut options: [String; OPTIONS_PER_QUESTION] = Default::default();
        for label in OptionLabel::ALL {
            options[label.index()] = raw
                .options
                .remove(&label.to_string())
                .ok_or(BankError::MissingOption { id, label })?;
        }

        // "no selection" is not a valid key
        let correct_answer = match OptionLabel::parse_selection(&raw.correct_answer) {
            Ok(Some(label)) => label,
            Ok(None) | Err(_) => {
                return Err(BankError::InvalidCorrectAnswer {
                    id,
                    value: raw.correct_answer,
                })
            }
        };

        Ok(Question {
            id,
            text: raw.text,
            options,
            correct_answer,
            explanation: raw.explanation.filter(|e| !e.trim().is_empty()),
        })
    }
}

/// Ordered, validated, immutable set of questions. Index order is
/// navigation order.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(raw: Vec<RawQuestion>) -> Result<Self, BankError> {
        if raw.is_empty() {
            return Err(BankError::Empty);
        }
        if let Some(dup) = raw.iter().map(|q| q.id).duplicates().next() {
            return Err(BankError::DuplicateId(dup));
        }

        let questions = raw
            .into_iter()
            .map(Question::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { questions })
    }

    pub fn from_json_str(json: &str) -> Result<Self, BankError> {
        let raw: Vec<RawQuestion> = serde_json::from_str(json)?;
        Self::new(raw)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BankError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| BankError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The sample bank compiled into the binary.
    pub fn builtin() -> Result<Self, BankError> {
        let json = BANK_DIR
            .get_file(BUILTIN_BANK_FILE)
            .and_then(|f| f.contents_utf8())
            .ok_or(BankError::Empty)?;
        Self::from_json_str(json)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    // Always false once validated.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }
}

impl fmt::Display for QuestionBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} questions (ids {})",
            self.len(),
            self.questions.iter().map(|q| q.id).join(", ")
        )
    }
}
