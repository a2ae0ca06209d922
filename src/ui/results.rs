use examsim::{
    scoring::{self, Verdict},
    util::truncate_to_width,
    ExamStats, OptionLabel, Question,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::{ui::scroll_offset, App};

const QUESTION_COLUMN_WIDTH: usize = 48;

/// Label and colour for a verdict cell
pub fn verdict_cell(verdict: Verdict) -> (&'static str, Color) {
    match verdict {
        Verdict::Correct => ("correct", Color::Green),
        Verdict::Incorrect => ("wrong", Color::Red),
        Verdict::Empty => ("empty", Color::DarkGray),
    }
}

/// Pure presenter for one answer-key row
pub fn present_row(
    question: &Question,
    chosen: Option<OptionLabel>,
    verdict: Verdict,
) -> Row<'static> {
    let (label, color) = verdict_cell(verdict);
    let chosen = chosen.map_or_else(|| "-".to_string(), |l| l.to_string());

    Row::new(vec![
        Cell::from(question.id.to_string()),
        Cell::from(truncate_to_width(&question.text, QUESTION_COLUMN_WIDTH)),
        Cell::from(chosen).style(Style::default().fg(color)),
        Cell::from(question.correct_answer.to_string())
            .style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(label).style(Style::default().fg(color)),
    ])
}

pub fn render(app: &App, f: &mut Frame) {
    let Some(stats) = app.proctor.stats() else {
        return;
    };

    let [summary, table, explanation, instructions] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(5),
        Constraint::Length(1),
    ])
    .margin(1)
    .areas(f.area());

    render_summary(&stats, f, summary);
    render_answer_key(app, f, table);
    render_explanation(app, f, explanation);

    let hints = Paragraph::new("(↑/↓) scroll  (r) restart  (esc) exit")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::DIM));
    f.render_widget(hints, instructions);
}

fn render_summary(stats: &ExamStats, f: &mut Frame, area: Rect) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let score_color = if stats.net_score < 0.0 {
        Color::Red
    } else {
        Color::Cyan
    };

    let line = Line::from(vec![
        Span::styled(format!("{} correct", stats.correct), bold_style.fg(Color::Green)),
        Span::raw("   "),
        Span::styled(format!("{} wrong", stats.incorrect), bold_style.fg(Color::Red)),
        Span::raw("   "),
        Span::styled(format!("{} empty", stats.empty), bold_style),
        Span::raw("   net score "),
        Span::styled(format!("{:.2}", stats.net_score), bold_style.fg(score_color)),
        Span::raw(format!(" / {}", stats.total())),
    ]);

    let summary = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Results "));
    f.render_widget(summary, area);
}

fn render_answer_key(app: &App, f: &mut Frame, area: Rect) {
    let session = app.proctor.session();
    // borders + header
    let visible = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(app.results_cursor, visible);

    let rows: Vec<Row> = scoring::verdicts(app.proctor.bank(), &session.answers)
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(position, (question, chosen, verdict))| {
            let row = present_row(question, chosen, verdict);
            if position == app.results_cursor {
                row.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                row
            }
        })
        .collect();

    let header = Row::new(vec!["Id", "Question", "Yours", "Key", "Result"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let widths = [
        Constraint::Length(6),
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(4),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Answer key "))
        .column_spacing(2);
    f.render_widget(table, area);
}

fn render_explanation(app: &App, f: &mut Frame, area: Rect) {
    let Some(question) = app.proctor.bank().get(app.results_cursor) else {
        return;
    };
    let text = question
        .explanation
        .as_deref()
        .unwrap_or("No explanation provided.");

    let explanation = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Explanation #{} ", question.id)),
    );
    f.render_widget(explanation, area);
}
