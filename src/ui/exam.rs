use examsim::{util::format_clock, PendingAction};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    ui::{centered_rect, scroll_offset},
    App, NAV_COLUMNS,
};

const MODAL_WIDTH: u16 = 50;
const MODAL_HEIGHT: u16 = 7;

pub fn render(app: &App, f: &mut Frame) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_header(app, f, header);

    let question_area = if app.navigator.open {
        let [nav, rest] = Layout::horizontal([
            Constraint::Length(navigator_width(app)),
            Constraint::Min(0),
        ])
        .areas(body);
        render_navigator(app, f, nav);
        rest
    } else {
        body
    };
    render_question(app, f, question_area);
    render_footer(app, f, footer);

    if let Some(action) = app.proctor.session().pending {
        render_confirmation(app, action, f);
    }
}

fn render_header(app: &App, f: &mut Frame, area: Rect) {
    let session = app.proctor.session();
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [left, center, right] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(inner);

    let position = format!(
        "Question {} / {}",
        session.current_index + 1,
        app.proctor.bank().len()
    );
    f.render_widget(Paragraph::new(position), left);

    let clock_style = if session.time_left < app.config.low_time_warning_secs {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let clock = Paragraph::new(Span::styled(format_clock(session.time_left), clock_style))
        .alignment(Alignment::Center);
    f.render_widget(clock, center);

    let answered = Paragraph::new(format!("{} answered", session.answered_count()))
        .alignment(Alignment::Right)
        .style(Style::default().add_modifier(Modifier::DIM));
    f.render_widget(answered, right);
}

fn render_question(app: &App, f: &mut Frame, area: Rect) {
    let Some(question) = app.proctor.current_question() else {
        return;
    };
    let selected = app.proctor.session().answers.get(&question.id).copied();

    let mut lines = vec![
        Line::from(Span::styled(
            question.text.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    for (label, text) in question.options() {
        let (marker, style) = if selected == Some(label) {
            (
                "(•)",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        } else {
            ("( )", Style::default())
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker} {label}. "), style),
            Span::styled(text.to_string(), style),
        ]));
    }

    let viewer = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" #{} ", question.id)),
    );
    f.render_widget(viewer, area);
}

/// Columns taken by one grid cell: the widest id plus a space.
fn navigator_cell_width(app: &App) -> usize {
    let widest = app
        .proctor
        .bank()
        .iter()
        .map(|q| q.id.to_string().len())
        .max()
        .unwrap_or(1);
    widest + 1
}

fn navigator_title(app: &App) -> String {
    format!(
        " {} / {} answered ",
        app.proctor.session().answered_count(),
        app.proctor.bank().len()
    )
}

fn navigator_width(app: &App) -> u16 {
    let grid = NAV_COLUMNS * navigator_cell_width(app);
    // borders on both sides
    (grid.max(navigator_title(app).len()) + 2) as u16
}

fn render_navigator(app: &App, f: &mut Frame, area: Rect) {
    let session = app.proctor.session();
    let questions = app.proctor.bank().questions();
    let cell = navigator_cell_width(app) - 1;

    let visible = area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(app.navigator.cursor / NAV_COLUMNS, visible);

    let lines: Vec<Line> = questions
        .chunks(NAV_COLUMNS)
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(row, chunk)| {
            let spans: Vec<Span> = chunk
                .iter()
                .enumerate()
                .map(|(col, question)| {
                    let index = row * NAV_COLUMNS + col;
                    let mut style = if session.answers.contains_key(&question.id) {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default().add_modifier(Modifier::DIM)
                    };
                    if index == session.current_index {
                        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                    }
                    if index == app.navigator.cursor {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Span::styled(format!("{:>cell$} ", question.id), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let navigator = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(navigator_title(app)),
    );
    f.render_widget(navigator, area);
}

fn render_footer(app: &App, f: &mut Frame, area: Rect) {
    let hints = if app.navigator.open {
        "(arrows) move  (enter) go  (tab) close".to_string()
    } else {
        let next = if app.proctor.is_last_question() {
            "finish"
        } else {
            "next"
        };
        format!("(←) previous  (→) {next}  (a-e) answer  (x) clear  (tab) questions  (f) finish  (q) quit")
    };
    let footer = Paragraph::new(hints)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::DIM));
    f.render_widget(footer, area);
}

fn render_confirmation(app: &App, action: PendingAction, f: &mut Frame) {
    let session = app.proctor.session();
    let (title, message) = match action {
        PendingAction::Finish => {
            let unanswered = app
                .proctor
                .bank()
                .len()
                .saturating_sub(session.answered_count());
            (
                " Finish exam ",
                format!("Submit your answers? {unanswered} question(s) left unanswered."),
            )
        }
        PendingAction::Quit => (
            " Quit exam ",
            "Leave the exam? All answers will be discarded.".to_string(),
        ),
    };

    let area = centered_rect(MODAL_WIDTH, MODAL_HEIGHT, f.area());
    let modal = Paragraph::new(vec![
        Line::from(message),
        Line::default(),
        Line::from(Span::styled(
            "(y) confirm  (n) cancel",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(title),
    );
    f.render_widget(Clear, area);
    f.render_widget(modal, area);
}
