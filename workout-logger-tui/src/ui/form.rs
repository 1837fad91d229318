// workout-logger-tui/src/ui/form.rs
use crate::{
    app::{App, FocusField},
    ui::to_ratatui_color,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use workout_logger_lib::{CatalogState, FormPhase};

struct FieldRow {
    focus: FocusField,
    label: &'static str,
    placeholder: &'static str,
}

const ROWS: [FieldRow; 7] = [
    FieldRow { focus: FocusField::Exercise, label: "Exercise", placeholder: "choose one" },
    FieldRow { focus: FocusField::CustomExercise, label: "Custom Exercise", placeholder: "type a name" },
    FieldRow { focus: FocusField::Weight, label: "Weight", placeholder: "e.g. 225" },
    FieldRow { focus: FocusField::WeightUnit, label: "Unit", placeholder: "" },
    FieldRow { focus: FocusField::Reps, label: "Reps", placeholder: "1-25" },
    FieldRow { focus: FocusField::Rpe, label: "RPE", placeholder: "1-10" },
    FieldRow { focus: FocusField::Tempo, label: "Tempo", placeholder: "e.g. 3-1-1" },
];

pub fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let accent = to_ratatui_color(app.accent);
    let form_focused = app.focus != FocusField::History;
    let title = if app.session.form.phase() == FormPhase::Submitting {
        "Log Workout (saving...)"
    } else {
        "Log Workout"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if form_focused {
            Style::default().fg(accent)
        } else {
            Style::default().fg(Color::DarkGray)
        });
    f.render_widget(block, area);
    let inner = area.inner(&Margin { vertical: 1, horizontal: 1 });

    let visible: Vec<&FieldRow> = ROWS
        .iter()
        .filter(|row| row.focus != FocusField::CustomExercise || app.custom_exercise_visible())
        .collect();

    // Label + value per field, then a spacer, the button and a catalog hint
    let mut constraints: Vec<Constraint> = visible.iter().map(|_| Constraint::Length(2)).collect();
    constraints.extend([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)]);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let draft = app.session.form.draft();
    for (row, chunk) in visible.iter().zip(chunks.iter()) {
        let Some(field) = row.focus.form_field() else {
            continue;
        };
        let focused = app.focus == row.focus;
        let value = draft.get(field);
        render_field(f, row, value, focused, accent, *chunk);

        if focused && row.focus.is_text_input() {
            let x = chunk.x + 2 + value.chars().count() as u16;
            f.set_cursor(x.min(chunk.right().saturating_sub(1)), chunk.y + 1);
        }
    }

    let button_area = chunks[visible.len() + 1];
    let button_style = if app.focus == FocusField::Submit {
        Style::default().reversed()
    } else {
        Style::default().fg(accent)
    };
    f.render_widget(
        Paragraph::new("[ Add Workout ]")
            .alignment(Alignment::Center)
            .style(button_style),
        button_area,
    );

    let hint = match app.session.catalog.state() {
        CatalogState::NotLoaded => Some("Loading exercises..."),
        CatalogState::Unavailable => Some("Exercise list unavailable, pick Custom"),
        CatalogState::Loaded(_) => None,
    };
    if let Some(hint) = hint {
        f.render_widget(
            Paragraph::new(hint).style(Style::default().fg(Color::DarkGray).italic()),
            chunks[visible.len() + 2],
        );
    }
}

fn render_field(f: &mut Frame, row: &FieldRow, value: &str, focused: bool, accent: Color, area: Rect) {
    let label_style = if focused {
        Style::default().fg(accent).bold()
    } else {
        Style::default()
    };
    let (text, mut value_style) = if value.is_empty() {
        (row.placeholder, Style::default().fg(Color::DarkGray))
    } else {
        (value, Style::default())
    };
    if focused {
        value_style = value_style.reversed();
    }
    let shown = if row.focus.is_selector() {
        format!("< {} >", text)
    } else {
        text.to_string()
    };

    let lines = vec![
        Line::from(Span::styled(row.label, label_style)),
        Line::from(vec![Span::raw("  "), Span::styled(shown, value_style)]),
    ];
    f.render_widget(Paragraph::new(lines), area);
}
