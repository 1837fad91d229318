// workout-logger-tui/src/ui/history.rs
use crate::{
    app::{App, FocusField},
    ui::to_ratatui_color,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use workout_logger_lib::WorkoutCard;

pub fn render_history(f: &mut Frame, app: &mut App, area: Rect) {
    let accent = to_ratatui_color(app.accent);
    let history = &app.session.history;
    let title = if history.is_refreshing() {
        format!("Workout History ({}) refreshing...", history.len())
    } else {
        format!("Workout History ({})", history.len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if app.focus == FocusField::History {
            Style::default().fg(accent)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    if history.is_empty() {
        let message = if history.is_loaded() {
            "No workouts logged yet."
        } else {
            "Loading workouts..."
        };
        f.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = history
        .cards()
        .into_iter()
        .map(|card| card_item(card, accent))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut app.history_list_state);
}

fn card_item(card: WorkoutCard, accent: Color) -> ListItem<'static> {
    let details = format!("{} | {} | {} | {}", card.weight, card.reps, card.rpe, card.tempo);
    ListItem::new(vec![
        Line::from(Span::styled(card.title, Style::default().fg(accent).bold())),
        Line::from(details),
        Line::from(Span::styled(card.date, Style::default().fg(Color::DarkGray))),
        Line::from(""),
    ])
}
