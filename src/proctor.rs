use std::time::Duration;

use crate::bank::{Question, QuestionBank};
use crate::config::ExamConfig;
use crate::countdown::Countdown;
use crate::scoring::ExamStats;
use crate::session::{Exam, ExamStatus, Intent, Session};

/// Owns the live session and the countdown that drives it.
///
/// Every mutation goes through [`Exam::reduce`]; the proctor only decides
/// when the countdown exists. It is armed fresh on each entry into
/// `InProgress` and released in the same call that leaves it, so no tick
/// can land after a finish, quit or restart.
#[derive(Debug)]
pub struct Proctor {
    exam: Exam,
    session: Session,
    countdown: Option<Countdown>,
    tick_period: Duration,
}

impl Proctor {
    pub fn new(bank: QuestionBank, config: &ExamConfig) -> Self {
        let exam = Exam::new(bank, config);
        let session = exam.initial_session();
        Self {
            exam,
            session,
            countdown: None,
            tick_period: crate::countdown::TICK_PERIOD,
        }
    }

    /// Shortens the countdown period, for headless runs.
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn exam(&self) -> &Exam {
        &self.exam
    }

    pub fn bank(&self) -> &QuestionBank {
        self.exam.bank()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.exam.current_question(&self.session)
    }

    pub fn is_last_question(&self) -> bool {
        self.exam.is_last_question(&self.session)
    }

    pub fn stats(&self) -> Option<ExamStats> {
        self.exam.stats(&self.session)
    }

    pub fn countdown_armed(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn dispatch(&mut self, intent: Intent) -> &Session {
        let before = self.session.status;
        self.session = self.exam.reduce(&self.session, intent);
        self.sync_countdown(before);
        &self.session
    }

    /// Feeds wall time to the countdown and applies the ticks that fell due.
    pub fn advance(&mut self, elapsed: Duration) -> &Session {
        let due = match self.countdown.as_mut() {
            Some(countdown) => countdown.advance(elapsed),
            None => 0,
        };
        for _ in 0..due {
            self.dispatch(Intent::Tick);
            if self.countdown.is_none() {
                break;
            }
        }
        &self.session
    }

    fn sync_countdown(&mut self, before: ExamStatus) {
        let now = self.session.status;
        if now != ExamStatus::InProgress {
            if self.countdown.take().is_some() {
                tracing::debug!(status = %now, "countdown released");
            }
        } else if before != ExamStatus::InProgress {
            let countdown = Countdown::with_period(self.tick_period);
            tracing::debug!(period = ?countdown.period(), "countdown armed");
            self.countdown = Some(countdown);
        }
    }
}
