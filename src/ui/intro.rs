use examsim::scoring::INCORRECT_PER_CORRECT;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::{ui::centered_rect, App};

const INTRO_WIDTH: u16 = 56;

pub fn render(app: &App, f: &mut Frame) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let lines = vec![
        Line::from(Span::styled(
            "EXAM SIMULATOR",
            bold_style.fg(Color::Cyan),
        )),
        Line::default(),
        Line::from(format!("{} questions", app.proctor.bank().len())),
        Line::from(format!("{} minutes", app.config.duration_mins())),
        Line::from(format!(
            "{} options per question, one correct",
            app.config.options_per_question()
        )),
        Line::default(),
        Line::from(Span::styled(
            format!("{INCORRECT_PER_CORRECT} wrong answers cancel 1 correct answer"),
            Style::default().fg(Color::Yellow),
        )),
        Line::default(),
        Line::from(Span::styled("(enter) start  (esc) exit", dim_style)),
    ];

    let area = centered_rect(INTRO_WIDTH, lines.len() as u16 + 2, f.area());
    let intro = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(intro, area);
}
