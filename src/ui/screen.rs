use examsim::ExamStatus;
use ratatui::Frame;

use crate::{
    ui::{exam, intro, results},
    App,
};

/// A UI Screen boundary: one per exam status
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

/// Intro screen - bank summary and the scoring rule
pub struct IntroScreen;

impl Screen for IntroScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        intro::render(app, f);
    }
}

/// Exam screen - question viewer, navigator and confirmation modal
pub struct ExamScreen;

impl Screen for ExamScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        exam::render(app, f);
    }
}

/// Results screen - stats and the answer key
pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        results::render(app, f);
    }
}

/// Helper to construct the appropriate screen for the current status
pub fn current_screen(status: ExamStatus) -> Box<dyn Screen> {
    match status {
        ExamStatus::NotStarted => Box::new(IntroScreen),
        ExamStatus::InProgress => Box::new(ExamScreen),
        ExamStatus::Finished => Box::new(ResultsScreen),
    }
}
