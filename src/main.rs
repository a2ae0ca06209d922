pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use examsim::{
    config::{ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, EventSource, ExamEvent, FixedTicker, Runner, Ticker},
    BankError, ExamConfig, ExamStatus, Intent, OptionLabel, Proctor, QuestionBank,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// Questions per row in the navigator grid.
pub const NAV_COLUMNS: usize = 5;

/// timed multiple-choice exam simulator
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A timed multiple-choice exam simulator: answer five-option questions against the clock, jump around with the question navigator, and get a net score where four wrong answers cancel one correct answer."
)]
pub struct Cli {
    /// question bank JSON file (defaults to the built-in sample bank)
    #[clap(short = 'q', long)]
    questions: Option<PathBuf>,

    /// exam duration in minutes (overrides the saved config)
    #[clap(short = 'd', long)]
    duration_mins: Option<u32>,

    /// save the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,

    /// validate the question bank, print a summary and exit
    #[clap(long)]
    validate: bool,
}

impl Cli {
    fn load_bank(&self) -> Result<QuestionBank, BankError> {
        match &self.questions {
            Some(path) => QuestionBank::from_path(path),
            None => QuestionBank::builtin(),
        }
    }

    fn exam_config(&self, store: &impl ConfigStore) -> ExamConfig {
        let config = store.load();
        match self.duration_mins {
            Some(mins) => config.with_duration_mins(mins),
            None => config,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct NavigatorState {
    pub open: bool,
    pub cursor: usize,
}

#[derive(Debug)]
pub struct App {
    pub proctor: Proctor,
    pub config: ExamConfig,
    pub navigator: NavigatorState,
    pub results_cursor: usize,
}

impl App {
    pub fn new(bank: QuestionBank, config: ExamConfig) -> Self {
        Self {
            proctor: Proctor::new(bank, &config),
            config,
            navigator: NavigatorState::default(),
            results_cursor: 0,
        }
    }

    pub fn status(&self) -> ExamStatus {
        self.proctor.session().status
    }

    pub fn dispatch(&mut self, intent: Intent) {
        let before = self.status();
        self.proctor.dispatch(intent);
        if self.status() != before {
            self.navigator = NavigatorState::default();
            self.results_cursor = 0;
        }
    }

    pub fn on_elapsed(&mut self, elapsed: Duration) {
        let before = self.status();
        self.proctor.advance(elapsed);
        if self.status() != before {
            self.navigator = NavigatorState::default();
        }
    }

    /// Returns true when the app should exit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if is_interrupt(&key) {
            return true;
        }

        match self.status() {
            ExamStatus::NotStarted => match key.code {
                KeyCode::Enter => self.dispatch(Intent::Start),
                KeyCode::Esc | KeyCode::Char('q') => return true,
                _ => {}
            },
            ExamStatus::InProgress => {
                if self.proctor.session().pending.is_some() {
                    self.on_confirmation_key(key);
                } else if self.navigator.open {
                    self.on_navigator_key(key);
                } else {
                    self.on_question_key(key);
                }
            }
            ExamStatus::Finished => match key.code {
                KeyCode::Down | KeyCode::Char('j') => {
                    let last = self.proctor.bank().len().saturating_sub(1);
                    self.results_cursor = (self.results_cursor + 1).min(last);
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.results_cursor = self.results_cursor.saturating_sub(1);
                }
                KeyCode::Home => self.results_cursor = 0,
                KeyCode::Char('r') => self.dispatch(Intent::Restart),
                KeyCode::Esc | KeyCode::Char('q') => return true,
                _ => {}
            },
        }
        false
    }

    fn on_question_key(&mut self, key: KeyEvent) {
        let intent = match key.code {
            KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace => {
                Intent::SelectAnswer(None)
            }
            KeyCode::Left | KeyCode::Char('h') => Intent::Previous,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter => Intent::Next,
            KeyCode::Char('f') => Intent::RequestFinish,
            KeyCode::Esc | KeyCode::Char('q') => Intent::RequestQuit,
            KeyCode::Tab | KeyCode::Char('g') => {
                self.navigator = NavigatorState {
                    open: true,
                    cursor: self.proctor.session().current_index,
                };
                return;
            }
            KeyCode::Char(c) => match OptionLabel::from_key(c) {
                Some(label) => Intent::SelectAnswer(Some(label)),
                None => return,
            },
            _ => return,
        };
        self.dispatch(intent);
    }

    fn on_confirmation_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => self.dispatch(Intent::Confirm),
            KeyCode::Char('n') | KeyCode::Esc => self.dispatch(Intent::Cancel),
            _ => {}
        }
    }

    fn on_navigator_key(&mut self, key: KeyEvent) {
        let last = self.proctor.bank().len().saturating_sub(1);
        let cursor = &mut self.navigator.cursor;
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => *cursor = cursor.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => *cursor = (*cursor + 1).min(last),
            KeyCode::Up | KeyCode::Char('k') => *cursor = cursor.saturating_sub(NAV_COLUMNS),
            KeyCode::Down | KeyCode::Char('j') => *cursor = (*cursor + NAV_COLUMNS).min(last),
            KeyCode::Enter => {
                let target = *cursor;
                self.navigator.open = false;
                self.dispatch(Intent::Navigate(target));
            }
            KeyCode::Tab | KeyCode::Esc | KeyCode::Char('g') => self.navigator.open = false,
            _ => {}
        }
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let log_path = logging::init()?;

    let store = FileConfigStore::new();
    let config = cli.exam_config(&store);
    if let Err(err) = config.validate() {
        Cli::command().error(ErrorKind::ValueValidation, err).exit();
    }

    let bank = match cli.load_bank() {
        Ok(bank) => bank,
        Err(err) => {
            tracing::error!(%err, "question bank rejected");
            Cli::command().error(ErrorKind::InvalidValue, err).exit();
        }
    };
    tracing::info!(?log_path, questions = bank.len(), "question bank loaded");

    if cli.save_config {
        store.save(&config)?;
        tracing::info!(path = %store.path().display(), "config saved");
    }

    if cli.validate {
        println!("ok: {bank}");
        println!(
            "duration: {} min, {} options per question",
            config.duration_mins(),
            config.options_per_question()
        );
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(bank, config);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let result = start_tui(&mut terminal, &mut app, runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut runner: Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        let step = runner.step();
        let before = app.status();
        // time is applied before the event of the same step
        app.on_elapsed(step.elapsed);
        let expired = app.status() != before;

        match step.event {
            ExamEvent::Tick => {
                if expired || app.status() == ExamStatus::InProgress {
                    terminal.draw(|f| ui::draw(app, f))?;
                }
            }
            ExamEvent::Resize => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
            ExamEvent::Key(key) => {
                // a key typed at the exam screen is not meant for the results screen
                let exit = if expired && !is_interrupt(&key) {
                    false
                } else {
                    app.on_key(key)
                };
                if exit {
                    break;
                }
                terminal.draw(|f| ui::draw(app, f))?;
            }
        }
    }

    Ok(())
}
