use super::{App, AuthForm, InputFocus};
use crate::navigation::{Page, Route};
use crate::study::{StudyTab, StudyView};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

fn ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// Tab switching, quiz answers and deck paging. Shared by the results page
/// and the saved-history detail view.
fn handle_study_key(view: &mut StudyView, key: KeyEvent, now: Instant) -> bool {
    match key.code {
        KeyCode::Tab => view.cycle_tab(true),
        KeyCode::BackTab => view.cycle_tab(false),
        KeyCode::Char(c @ '1'..='3') => {
            let index = c as usize - '1' as usize;
            view.select_tab(StudyTab::ALL[index]);
        }
        KeyCode::Char(c @ 'a'..='z') if view.active() == StudyTab::Quiz => {
            view.select_answer(c as usize - 'a' as usize, now);
        }
        KeyCode::Left if view.active() == StudyTab::Flashcards => view.deck.previous(now),
        KeyCode::Right if view.active() == StudyTab::Flashcards => view.deck.next(now),
        KeyCode::Char(' ') | KeyCode::Enter if view.active() == StudyTab::Flashcards => {
            view.deck.flip()
        }
        _ => return false,
    }
    true
}

/// Returns true when the form should be submitted.
fn handle_form_key(form: &mut AuthForm, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_focus(),
        KeyCode::Enter => {
            if form.focus == super::AuthField::Password {
                return true;
            }
            form.toggle_focus();
        }
        KeyCode::Left => form.focused_field().left(),
        KeyCode::Right => form.focused_field().right(),
        KeyCode::Home => form.focused_field().home(),
        KeyCode::End => form.focused_field().end(),
        KeyCode::Backspace => form.focused_field().backspace(),
        KeyCode::Delete => form.focused_field().delete(),
        KeyCode::Char(c) => form.focused_field().insert(c),
        _ => {}
    }
    false
}

impl App {
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if ctrl(&key, 'c') {
            self.quit();
            return;
        }
        if self.handle_nav_key(key, now) {
            return;
        }

        match self.page() {
            Page::Landing => self.handle_landing_key(key, now),
            Page::About => self.handle_about_key(key, now),
            Page::Input => self.handle_input_key(key, now),
            Page::Results => self.handle_results_key(key, now),
            Page::History => self.handle_history_key(key, now),
            Page::Demo => self.handle_demo_key(key, now),
            Page::Login => {
                if key.code == KeyCode::Esc {
                    self.go(Route::Landing, now);
                } else if !self.login.submitting && handle_form_key(&mut self.login, key) {
                    self.submit_login();
                }
            }
            Page::Signup => {
                if key.code == KeyCode::Esc {
                    self.go(Route::Landing, now);
                } else if !self.signup.submitting
                    && self.signup.success.is_none()
                    && handle_form_key(&mut self.signup, key)
                {
                    self.submit_signup();
                }
            }
        }
    }

    /// Function keys mirror the navigation bar.
    fn handle_nav_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let KeyCode::F(n) = key.code else {
            return false;
        };
        match n {
            1 => self.go(Route::Landing, now),
            2 => self.go(Route::Input, now),
            3 => self.go(Route::Results(None), now),
            4 => self.go(Route::History, now),
            5 => self.go(Route::Demo, now),
            6 => self.go(Route::About, now),
            7 if self.is_authenticated() => self.logout(now),
            7 => self.go(Route::Login, now),
            8 => self.go(Route::Signup, now),
            _ => return false,
        }
        true
    }

    fn handle_landing_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('s') => self.go(Route::Input, now),
            KeyCode::Char('d') => self.go(Route::Demo, now),
            KeyCode::Char('a') => self.go(Route::About, now),
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            _ => {}
        }
    }

    fn handle_about_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Enter => self.go(Route::Input, now),
            KeyCode::Esc => self.go(Route::Landing, now),
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent, now: Instant) {
        if ctrl(&key, 'g') {
            self.submit_input(now);
            return;
        }
        if key.code == KeyCode::Esc {
            if self.processing.error().is_some() {
                self.processing.reset();
            } else {
                self.go(Route::Landing, now);
            }
            return;
        }
        if self.is_processing() {
            return;
        }

        let input = &mut self.input;
        match key.code {
            KeyCode::Tab => input.focus = input.focus.next(),
            KeyCode::Left if input.focus == InputFocus::Level => input.level = input.level.previous(),
            KeyCode::Right if input.focus == InputFocus::Level => input.level = input.level.next(),
            KeyCode::Enter => match input.focus {
                InputFocus::Text => input.type_char('\n'),
                InputFocus::File | InputFocus::Level => self.submit_input(now),
            },
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.type_char(c),
            code => {
                if let Some(field) = input.focused_field() {
                    match code {
                        KeyCode::Left => field.left(),
                        KeyCode::Right => field.right(),
                        KeyCode::Home => field.home(),
                        KeyCode::End => field.end(),
                        KeyCode::Backspace => field.backspace(),
                        KeyCode::Delete => field.delete(),
                        _ => {}
                    }
                }
            }
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent, now: Instant) {
        if ctrl(&key, 'l') {
            self.toggle_narration(now);
            return;
        }
        if ctrl(&key, 's') {
            self.save_results(now);
            return;
        }
        if ctrl(&key, 'e') {
            self.export_results(now);
            return;
        }
        if let Some(view) = self.results.as_mut()
            && handle_study_key(view, key, now)
        {
            return;
        }
        match key.code {
            KeyCode::Char('n') => self.go(Route::Input, now),
            KeyCode::Esc => self.go(Route::Input, now),
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent, now: Instant) {
        if let Some(view) = self.history.detail.as_mut() {
            if ctrl(&key, 'l') {
                self.toggle_narration(now);
            } else if key.code == KeyCode::Esc {
                self.close_history_item();
            } else {
                handle_study_key(view, key, now);
            }
            return;
        }

        let history = &mut self.history;
        match key.code {
            KeyCode::Up => history.selected = history.selected.saturating_sub(1),
            KeyCode::Down => {
                if history.selected + 1 < history.items.len() {
                    history.selected += 1;
                }
            }
            KeyCode::Enter => self.open_history_item(),
            KeyCode::Char('r') => self.reload_history(),
            KeyCode::Char('n') => self.go(Route::Input, now),
            KeyCode::Esc => self.go(Route::Landing, now),
            _ => {}
        }
    }

    fn handle_demo_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('g') => self.trigger_demo(),
            KeyCode::Char('i') => self.go(Route::Input, now),
            KeyCode::Esc => {
                if self.demo_hook.error().is_some() {
                    self.demo_hook.reset();
                } else {
                    self.go(Route::Landing, now);
                }
            }
            _ => {}
        }
    }
}
