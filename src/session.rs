use std::collections::BTreeSet;

use crate::bank::{OptionLabel, Question, QuestionBank};
use crate::config::ExamConfig;
use crate::scoring::{self, Answers, ExamStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ExamStatus {
    NotStarted,
    InProgress,
    Finished,
}

/// Destructive action proposed by the user and awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum PendingAction {
    Finish,
    Quit,
}

/// A named user action (or the countdown tick) that may change the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start,
    /// `None` clears the current selection.
    SelectAnswer(Option<OptionLabel>),
    Navigate(usize),
    Next,
    Previous,
    RequestFinish,
    RequestQuit,
    /// Applies whichever action is pending.
    Confirm,
    Cancel,
    Tick,
    Restart,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub status: ExamStatus,
    pub current_index: usize,
    pub answers: Answers,
    /// Not populated by any intent yet; reset with the rest of the attempt.
    pub marked_for_review: BTreeSet<u32>,
    pub time_left: u32,
    pub pending: Option<PendingAction>,
}

impl Session {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            status: ExamStatus::NotStarted,
            current_index: 0,
            answers: Answers::new(),
            marked_for_review: BTreeSet::new(),
            time_left: duration_secs,
            pending: None,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == ExamStatus::InProgress
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }
}

/// Immutable context of an exam: the bank and the configured duration.
/// All session transitions go through [`Exam::reduce`].
#[derive(Debug, Clone)]
pub struct Exam {
    bank: QuestionBank,
    duration_secs: u32,
}

impl Exam {
    pub fn new(bank: QuestionBank, config: &ExamConfig) -> Self {
        Self {
            bank,
            duration_secs: config.duration_secs,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn initial_session(&self) -> Session {
        Session::new(self.duration_secs)
    }

    pub fn current_question<'a>(&'a self, session: &Session) -> Option<&'a Question> {
        self.bank.get(session.current_index)
    }

    pub fn is_last_question(&self, session: &Session) -> bool {
        session.current_index + 1 >= self.bank.len()
    }

    /// Scores are only exposed once the attempt is over.
    pub fn stats(&self, session: &Session) -> Option<ExamStats> {
        (session.status == ExamStatus::Finished)
            .then(|| scoring::score(&self.bank, &session.answers))
    }

    pub fn perform_finish(&self, session: &Session) -> Session {
        if !session.is_in_progress() {
            return session.clone();
        }
        tracing::info!(
            answered = session.answered_count(),
            time_left = session.time_left,
            "exam finished"
        );
        Session {
            status: ExamStatus::Finished,
            pending: None,
            ..session.clone()
        }
    }

    /// Discards the attempt from any state.
    pub fn perform_quit(&self, session: &Session) -> Session {
        tracing::info!(status = %session.status, "exam discarded");
        self.initial_session()
    }

    pub fn reduce(&self, session: &Session, intent: Intent) -> Session {
        tracing::debug!(?intent, status = %session.status, "reduce");

        match session.status {
            ExamStatus::NotStarted => match intent {
                Intent::Start => self.start(),
                _ => session.clone(),
            },
            ExamStatus::InProgress => match session.pending {
                Some(action) => self.reduce_pending(session, action, intent),
                None => self.reduce_active(session, intent),
            },
            ExamStatus::Finished => match intent {
                Intent::Restart => Session {
                    status: ExamStatus::NotStarted,
                    ..session.clone()
                },
                _ => session.clone(),
            },
        }
    }

    fn start(&self) -> Session {
        tracing::info!(
            questions = self.bank.len(),
            duration_secs = self.duration_secs,
            "exam started"
        );
        let session = Session {
            status: ExamStatus::InProgress,
            ..self.initial_session()
        };
        if session.time_left == 0 {
            return self.perform_finish(&session);
        }
        session
    }

    fn tick(&self, session: &Session) -> Session {
        if session.time_left <= 1 {
            tracing::info!("time is up");
            return self.perform_finish(&Session {
                time_left: 0,
                ..session.clone()
            });
        }
        Session {
            time_left: session.time_left - 1,
            ..session.clone()
        }
    }

    fn reduce_pending(&self, session: &Session, action: PendingAction, intent: Intent) -> Session {
        match intent {
            Intent::Confirm => match action {
                PendingAction::Finish => self.perform_finish(session),
                PendingAction::Quit => self.perform_quit(session),
            },
            Intent::Cancel => Session {
                pending: None,
                ..session.clone()
            },
            Intent::Tick => self.tick(session),
            // the confirmation owns input until it is resolved
            _ => session.clone(),
        }
    }

    fn reduce_active(&self, session: &Session, intent: Intent) -> Session {
        let mut next = session.clone();

        match intent {
            Intent::Tick => return self.tick(session),
            Intent::SelectAnswer(choice) => {
                let Some(question) = self.current_question(session) else {
                    return next;
                };
                match choice {
                    Some(label) => {
                        next.answers.insert(question.id, label);
                    }
                    None => {
                        next.answers.remove(&question.id);
                    }
                }
            }
            Intent::Navigate(index) => {
                if index < self.bank.len() {
                    next.current_index = index;
                } else {
                    tracing::warn!(index, len = self.bank.len(), "navigation out of range");
                }
            }
            Intent::Next => {
                if self.is_last_question(session) {
                    next.pending = Some(PendingAction::Finish);
                } else {
                    next.current_index += 1;
                }
            }
            Intent::Previous => {
                next.current_index = next.current_index.saturating_sub(1);
            }
            Intent::RequestFinish => next.pending = Some(PendingAction::Finish),
            Intent::RequestQuit => next.pending = Some(PendingAction::Quit),
            Intent::Start | Intent::Confirm | Intent::Cancel | Intent::Restart => {}
        }

        next
    }
}
