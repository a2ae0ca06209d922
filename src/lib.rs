// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod bank;
pub mod config;
pub mod countdown;
pub mod logging;
pub mod proctor;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod util;

pub use bank::{BankError, OptionLabel, Question, QuestionBank};
pub use config::{ConfigError, ExamConfig};
pub use proctor::Proctor;
pub use scoring::{ExamStats, Verdict};
pub use session::{Exam, ExamStatus, Intent, PendingAction, Session};
