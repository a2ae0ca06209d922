use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use examsim::runtime::{ExamEvent, FixedTicker, Runner, TestEventSource};
use examsim::{ExamConfig, ExamStatus, Intent, OptionLabel, Proctor, QuestionBank};

const BANK: &str = r#"[
    {"id": 1, "text": "Q1", "options": {"A": "a", "B": "b", "C": "c", "D": "d", "E": "e"}, "correctAnswer": "A"},
    {"id": 2, "text": "Q2", "options": {"A": "a", "B": "b", "C": "c", "D": "d", "E": "e"}, "correctAnswer": "B"},
    {"id": 3, "text": "Q3", "options": {"A": "a", "B": "b", "C": "c", "D": "d", "E": "e"}, "correctAnswer": "C"},
    {"id": 4, "text": "Q4", "options": {"A": "a", "B": "b", "C": "c", "D": "d", "E": "e"}, "correctAnswer": "D"}
]"#;

fn proctor(duration_secs: u32) -> Proctor {
    let config = ExamConfig {
        duration_secs,
        ..ExamConfig::default()
    };
    Proctor::new(QuestionBank::from_json_str(BANK).unwrap(), &config)
}

// Minimal key mapping, enough to drive a session without the binary.
fn intent_for(key: KeyEvent) -> Option<Intent> {
    match key.code {
        KeyCode::Enter => Some(Intent::Start),
        KeyCode::Right => Some(Intent::Next),
        KeyCode::Char('f') => Some(Intent::RequestFinish),
        KeyCode::Char('y') => Some(Intent::Confirm),
        KeyCode::Char(c) => OptionLabel::from_key(c).map(|l| Intent::SelectAnswer(Some(l))),
        _ => None,
    }
}

fn send_keys(tx: &mpsc::Sender<ExamEvent>, keys: &[KeyCode]) {
    for &code in keys {
        tx.send(ExamEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
            .unwrap();
    }
}

// Headless integration using the internal runtime + Proctor without a TTY
#[test]
fn headless_exam_flow_scores_answers() {
    let mut proctor = proctor(600);
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    // 2 correct, 2 wrong: 2 - 2/4
    send_keys(
        &tx,
        &[
            KeyCode::Enter,
            KeyCode::Char('a'),
            KeyCode::Right,
            KeyCode::Char('b'),
            KeyCode::Right,
            KeyCode::Char('e'),
            KeyCode::Right,
            KeyCode::Char('a'),
            KeyCode::Char('f'),
            KeyCode::Char('y'),
        ],
    );

    for _ in 0..100u32 {
        let step = runner.step();
        proctor.advance(step.elapsed);
        if let ExamEvent::Key(key) = step.event {
            if let Some(intent) = intent_for(key) {
                proctor.dispatch(intent);
            }
        }
        if proctor.session().status == ExamStatus::Finished {
            break;
        }
    }

    let stats = proctor.stats().expect("exam should be finished");
    assert_eq!((stats.correct, stats.incorrect, stats.empty), (2, 2, 0));
    assert_eq!(stats.net_score, 1.5);
    assert!(!proctor.countdown_armed());
}

#[test]
fn headless_timed_exam_finishes_by_time() {
    let mut proctor = proctor(3).with_tick_period(Duration::from_millis(10));
    proctor.dispatch(Intent::Start);
    proctor.dispatch(Intent::SelectAnswer(Some(OptionLabel::A)));

    let (_tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(10)),
    );

    // up to ~1s
    for _ in 0..100u32 {
        let step = runner.step();
        proctor.advance(step.elapsed);
        if proctor.session().status == ExamStatus::Finished {
            break;
        }
    }

    assert_eq!(
        proctor.session().status,
        ExamStatus::Finished,
        "timed exam should finish by timeout"
    );
    assert_eq!(proctor.session().time_left, 0);
    let stats = proctor.stats().unwrap();
    assert_eq!((stats.correct, stats.empty), (1, 3));
}

#[test]
fn headless_quit_then_restart_is_fresh() {
    let mut proctor = proctor(60).with_tick_period(Duration::from_millis(10));
    proctor.dispatch(Intent::Start);
    proctor.dispatch(Intent::SelectAnswer(Some(OptionLabel::C)));
    proctor.advance(Duration::from_millis(25));
    assert_eq!(proctor.session().time_left, 58);

    proctor.dispatch(Intent::RequestQuit);
    proctor.dispatch(Intent::Confirm);
    proctor.advance(Duration::from_millis(100));
    assert_eq!(proctor.session().status, ExamStatus::NotStarted);

    proctor.dispatch(Intent::Start);
    let session = proctor.session();
    assert_eq!(session.time_left, 60);
    assert!(session.answers.is_empty());
    assert_eq!(session.current_index, 0);
}
