use std::collections::BTreeMap;

use crate::bank::{OptionLabel, Question, QuestionBank};

/// Answers keyed by question id. A missing key means unanswered.
pub type Answers = BTreeMap<u32, OptionLabel>;

/// Penalty divisor: every this many incorrect answers cost one correct one.
pub const INCORRECT_PER_CORRECT: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    Empty,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExamStats {
    pub correct: usize,
    pub incorrect: usize,
    pub empty: usize,
    pub net_score: f64,
}

impl ExamStats {
    pub fn total(&self) -> usize {
        self.correct + self.incorrect + self.empty
    }
}

pub fn classify(question: &Question, answer: Option<OptionLabel>) -> Verdict {
    match answer {
        None => Verdict::Empty,
        Some(label) if label == question.correct_answer => Verdict::Correct,
        Some(_) => Verdict::Incorrect,
    }
}

/// Unrounded and unclamped; negative scores are valid.
pub fn net_score(correct: usize, incorrect: usize) -> f64 {
    correct as f64 - incorrect as f64 / INCORRECT_PER_CORRECT
}

/// One row of the answer key: the question, what was picked, and its bucket.
pub fn verdicts<'a>(
    bank: &'a QuestionBank,
    answers: &'a Answers,
) -> impl Iterator<Item = (&'a Question, Option<OptionLabel>, Verdict)> + 'a {
    bank.iter().map(move |q| {
        let answer = answers.get(&q.id).copied();
        (q, answer, classify(q, answer))
    })
}

pub fn score(bank: &QuestionBank, answers: &Answers) -> ExamStats {
    let mut stats = verdicts(bank, answers).fold(
        ExamStats::default(),
        |mut stats, (_, _, verdict)| {
            match verdict {
                Verdict::Correct => stats.correct += 1,
                Verdict::Incorrect => stats.incorrect += 1,
                Verdict::Empty => stats.empty += 1,
            }
            stats
        },
    );
    stats.net_score = net_score(stats.correct, stats.incorrect);
    stats
}
