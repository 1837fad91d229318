// src/app/input.rs
use super::{
    navigation_helpers::{list_next, list_previous},
    state::{ActiveModal, App, FocusField},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// Main key event handler method on App
impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('r') => self.reset_form(),
                _ => {}
            }
            return;
        }

        // Handle based on active modal first
        if self.active_modal != ActiveModal::None {
            self.handle_modal_input(key);
            return;
        }

        // Keys that work regardless of focus
        match key.code {
            KeyCode::Tab => return self.focus_next(),
            KeyCode::BackTab => return self.focus_previous(),
            KeyCode::F(5) => return self.refresh_history(),
            KeyCode::Esc => return self.session.dismiss_notification(),
            _ => {}
        }

        if self.focus.is_text_input() {
            self.handle_text_input(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.active_modal = ActiveModal::Help,
            _ => match self.focus {
                FocusField::Submit => self.handle_submit_input(key),
                FocusField::History => self.handle_history_input(key),
                _ => self.handle_selector_input(key),
            },
        }
    }

    fn handle_modal_input(&mut self, key: KeyEvent) {
        match self.active_modal {
            ActiveModal::Help => match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::Char('?') => {
                    self.active_modal = ActiveModal::None;
                }
                _ => {} // Ignore other keys in help
            },
            ActiveModal::ConfirmDeleteWorkout { .. } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.confirm_delete(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.active_modal = ActiveModal::None;
                }
                _ => {}
            },
            ActiveModal::None => {}
        }
    }

    fn handle_text_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.push_char(c),
            KeyCode::Backspace => self.pop_char(),
            KeyCode::Enter | KeyCode::Down => self.focus_next(),
            KeyCode::Up => self.focus_previous(),
            _ => {}
        }
    }

    fn handle_selector_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Right | KeyCode::Char('l') => self.cycle_selector(true),
            KeyCode::Left | KeyCode::Char('h') => self.cycle_selector(false),
            KeyCode::Backspace | KeyCode::Delete => self.pop_char(),
            KeyCode::Enter | KeyCode::Down => self.focus_next(),
            KeyCode::Up => self.focus_previous(),
            _ => {}
        }
    }

    fn handle_submit_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.submit(),
            KeyCode::Down => self.focus_next(),
            KeyCode::Up => self.focus_previous(),
            _ => {}
        }
    }

    fn handle_history_input(&mut self, key: KeyEvent) {
        let len = self.session.history.len();
        match key.code {
            KeyCode::Char('k') | KeyCode::Up => list_previous(&mut self.history_list_state, len),
            KeyCode::Char('j') | KeyCode::Down => list_next(&mut self.history_list_state, len),
            KeyCode::Char('d') | KeyCode::Delete => self.open_delete_confirmation(),
            _ => {}
        }
    }
}
