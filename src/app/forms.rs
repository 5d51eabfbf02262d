use crate::error::InputError;
use crate::models::Level;
use crate::worker::Submission;
use std::path::PathBuf;

/// Soft limit shown next to the text area; longer input is still sent.
pub const MAX_TEXT_CHARS: usize = 10_000;

/// Single editable string with a cursor measured in characters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFocus {
    #[default]
    Text,
    File,
    Level,
}

impl InputFocus {
    pub fn next(self) -> Self {
        match self {
            InputFocus::Text => InputFocus::File,
            InputFocus::File => InputFocus::Level,
            InputFocus::Level => InputFocus::Text,
        }
    }
}

/// Text or file to process, plus the reading level. The two sources are
/// exclusive: editing one empties the other.
#[derive(Debug, Clone, Default)]
pub struct InputPage {
    pub text: TextField,
    pub file: TextField,
    pub level: Level,
    pub focus: InputFocus,
}

impl InputPage {
    pub fn type_char(&mut self, c: char) {
        match self.focus {
            InputFocus::Text => {
                self.text.insert(c);
                self.file.clear();
            }
            InputFocus::File => {
                self.file.insert(c);
                self.text.clear();
            }
            InputFocus::Level => {}
        }
    }

    pub fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            InputFocus::Text => Some(&mut self.text),
            InputFocus::File => Some(&mut self.file),
            InputFocus::Level => None,
        }
    }

    pub fn counter(&self) -> String {
        format!("{}/10,000 characters", self.text.char_count())
    }

    pub fn over_limit(&self) -> bool {
        self.text.char_count() > MAX_TEXT_CHARS
    }

    /// What would be sent right now. Refuses when there is nothing to send.
    pub fn submission(&self) -> Result<Submission, InputError> {
        if !self.file.is_blank() {
            return Ok(Submission::File {
                path: PathBuf::from(self.file.value().trim()),
                level: self.level,
            });
        }
        if !self.text.is_blank() {
            return Ok(Submission::Text {
                text: self.text.value().to_string(),
                level: self.level,
            });
        }
        Err(InputError::NothingToSubmit)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthField {
    #[default]
    Email,
    Password,
}

/// Email/password form shared by the login and signup pages.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub email: TextField,
    pub password: TextField,
    pub focus: AuthField,
    pub submitting: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl AuthForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        };
    }

    /// Credentials ready to send, or a message for the form.
    pub fn credentials(&self) -> Result<(String, String), String> {
        let email = self.email.value().trim();
        if email.is_empty() || self.password.value().is_empty() {
            return Err("Email and password are required".to_string());
        }
        Ok((email.to_string(), self.password.value().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(text: &str) -> TextField {
        let mut field = TextField::new();
        text.chars().for_each(|c| field.insert(c));
        field
    }

    #[test]
    fn test_insert_and_backspace_at_cursor() {
        let mut f = field("helo");
        f.left();
        f.insert('l');
        assert_eq!(f.value(), "hello");
        assert_eq!(f.cursor(), 4);

        f.home();
        f.backspace();
        assert_eq!(f.value(), "hello");
        f.end();
        f.backspace();
        assert_eq!(f.value(), "hell");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut f = field("añb");
        f.left();
        f.backspace();
        assert_eq!(f.value(), "ab");
        f.insert('é');
        assert_eq!(f.value(), "aéb");
        f.delete();
        assert_eq!(f.value(), "aé");
        f.right();
        assert_eq!(f.cursor(), 2);
    }

    #[test]
    fn test_sources_are_exclusive() {
        let mut page = InputPage::default();
        page.type_char('x');
        page.focus = InputFocus::File;
        page.type_char('/');
        assert_eq!(page.text.value(), "");
        assert_eq!(page.file.value(), "/");

        page.focus = InputFocus::Text;
        page.type_char('y');
        assert_eq!(page.file.value(), "");
        assert_eq!(page.text.value(), "y");
    }

    #[test]
    fn test_empty_input_is_refused() {
        let mut page = InputPage::default();
        assert_eq!(page.submission(), Err(InputError::NothingToSubmit));
        page.type_char(' ');
        assert_eq!(page.submission(), Err(InputError::NothingToSubmit));
    }

    #[test]
    fn test_submission_carries_level() {
        let mut page = InputPage {
            level: Level::College,
            ..InputPage::default()
        };
        "Photosynthesis".chars().for_each(|c| page.type_char(c));
        assert_eq!(
            page.submission(),
            Ok(Submission::Text {
                text: "Photosynthesis".into(),
                level: Level::College,
            })
        );
        assert_eq!(page.counter(), "14/10,000 characters");
    }

    #[test]
    fn test_file_submission() {
        let mut page = InputPage {
            focus: InputFocus::File,
            ..InputPage::default()
        };
        " notes.pdf ".chars().for_each(|c| page.type_char(c));
        assert_eq!(
            page.submission(),
            Ok(Submission::File {
                path: PathBuf::from("notes.pdf"),
                level: Level::HighSchool,
            })
        );
    }

    #[test]
    fn test_auth_form_requires_both_fields() {
        let mut form = AuthForm::default();
        assert!(form.credentials().is_err());
        form.email = field("me@example.com");
        assert!(form.credentials().is_err());
        form.toggle_focus();
        form.focused_field().insert('p');
        assert_eq!(form.credentials(), Ok(("me@example.com".into(), "p".into())));
    }
}
