// workout-logger-tui/src/ui/status_bar.rs
use crate::app::{ActiveModal, App, FocusField};
use ratatui::{
    style::{Color, Style},
    layout::Rect,
    widgets::Paragraph,
    Frame,
};

pub fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.active_modal {
        ActiveModal::None => match app.focus {
            FocusField::History => " [Tab] Focus | [↑↓/jk] Select | [d]elete | [F5] Refresh | [?] Help | [Q]uit ",
            FocusField::Submit => " [Tab] Focus | [Enter] Add Workout | [Ctrl+R] Reset | [F5] Refresh | [?] Help | [Q]uit ",
            focus if focus.is_text_input() => " [Tab] Focus | Type to edit | [Enter] Next | [Ctrl+R] Reset | [Ctrl+C] Quit ",
            _ => " [Tab] Focus | [←→] Change | [Enter] Next | [Ctrl+R] Reset | [F5] Refresh | [?] Help | [Q]uit ",
        },
        ActiveModal::Help => " [Esc/Enter/?] Close Help ",
        ActiveModal::ConfirmDeleteWorkout { .. } => " [Y]es delete | [N]o / [Esc] Cancel ",
    };

    let status_paragraph =
        Paragraph::new(status_text).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status_paragraph, area);
}
