// workout-logger-tui/src/ui/modals.rs
use crate::{
    app::{ActiveModal, App},
    ui::{
        layout::{centered_rect, centered_rect_fixed},
        to_ratatui_color,
    },
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use workout_logger_lib::Severity;

pub fn render_modal(f: &mut Frame, app: &App) {
    match &app.active_modal {
        ActiveModal::Help => render_help_modal(f, app),
        ActiveModal::ConfirmDeleteWorkout { .. } => render_confirmation_modal(f, app),
        ActiveModal::None => {}
    }
}

fn render_help_modal(f: &mut Frame, app: &App) {
    let block = Block::default()
        .title("Help (?)")
        .borders(Borders::ALL)
        .title_style(Style::new().bold())
        .border_style(Style::new().fg(to_ratatui_color(app.accent)));
    let area = centered_rect(60, 70, f.size());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let help_text = vec![
        Line::from("--- Global ---").style(Style::new().bold().underlined()),
        Line::from(" Tab / Shift+Tab: Move Focus"),
        Line::from(" F5: Refresh History"),
        Line::from(" Ctrl+R: Reset Form"),
        Line::from(" Esc: Close Notification"),
        Line::from(" q: Quit (outside text fields)"),
        Line::from(" Ctrl+C: Quit"),
        Line::from(" ?: Show/Hide This Help"),
        Line::from(""),
        Line::from("--- Form ---").style(Style::new().bold().underlined()),
        Line::from(" ← / →: Change Exercise, Unit, Reps, RPE"),
        Line::from(" Backspace: Clear Selection / Delete Character"),
        Line::from(" Enter: Next Field, or Add Workout on the button"),
        Line::from(" Pick \"Custom\" to type an exercise name"),
        Line::from(""),
        Line::from("--- History ---").style(Style::new().bold().underlined()),
        Line::from(" k/j / ↑/↓: Select Workout"),
        Line::from(" d / Delete: Delete Selected Workout"),
        Line::from(""),
        Line::from(Span::styled(
            " Press Esc, ?, or Enter to close ",
            Style::new().italic().fg(to_ratatui_color(app.accent)),
        )),
    ];

    let paragraph = Paragraph::new(help_text).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area.inner(&Margin { vertical: 1, horizontal: 1 }));
}

fn render_confirmation_modal(f: &mut Frame, app: &App) {
    if let ActiveModal::ConfirmDeleteWorkout { exercise_name, .. } = &app.active_modal {
        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL)
            .border_style(Style::new().fg(Color::Red).add_modifier(Modifier::BOLD));

        let question = format!("Delete this {} workout?", exercise_name);
        let options = "[Y]es / [N]o (Esc)";

        let text_width = question.chars().count().max(options.len()) as u16;
        let area = centered_rect_fixed(text_width + 4, 4, f.size());
        f.render_widget(Clear, area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area.inner(&Margin { vertical: 1, horizontal: 1 }));

        f.render_widget(Paragraph::new(question).alignment(Alignment::Center), chunks[0]);
        f.render_widget(Paragraph::new(options).alignment(Alignment::Center), chunks[1]);
    }
}

/// Snackbar in the bottom-left corner of `area`.
pub fn render_notification(f: &mut Frame, app: &App, area: Rect) {
    let note = app.session.notifications.current();
    let color = match note.severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
    };
    let width = (note.message.chars().count() as u16 + 12).min(area.width);
    let height = 3.min(area.height);
    let snackbar = Rect {
        x: area.x,
        y: area.bottom().saturating_sub(height),
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(color))
        .title(note.severity.to_string());
    let text = Line::from(vec![
        Span::styled(note.message.as_str(), Style::new().fg(color).bold()),
        Span::styled("  [Esc]", Style::new().fg(Color::DarkGray)),
    ]);
    f.render_widget(Clear, snackbar);
    f.render_widget(Paragraph::new(text).block(block), snackbar);
}
