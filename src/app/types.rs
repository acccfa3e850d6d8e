//! Type definitions for the application state.
//!
//! Contains enums and structs used for tracking UI state:
//! - [`Screen`] - Which screen is currently displayed
//! - [`Focus`] - Which vault component has focus
//! - [`LoginForm`] - Sign-in / registration form state
//! - [`Notice`] - Dismissible status banner

/// Represents which screen is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Vault,
}

/// Which vault component has focus (ignored while the editor is open)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Table,
    Filter,
    AddForm,
}

/// Whether the login screen is signing in or registering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    Register,
}

/// Login screen form state
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    /// Collected during registration, presence-checked only.
    pub fullname: String,
    pub age: String,
    /// Index of the focused field, top to bottom.
    pub field: usize,
    pub reveal_password: bool,
    /// A request is in flight; inputs are locked until it resolves.
    pub busy: bool,
}

impl LoginForm {
    /// Number of fields in the current mode.
    pub fn field_count(&self) -> usize {
        match self.mode {
            AuthMode::SignIn => 2,
            AuthMode::Register => 4,
        }
    }

    pub fn focus_next(&mut self) {
        self.field = (self.field + 1) % self.field_count();
    }

    pub fn focus_prev(&mut self) {
        self.field = (self.field + self.field_count() - 1) % self.field_count();
    }

    /// Switch between sign-in and register, keeping email and password.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::Register,
            AuthMode::Register => AuthMode::SignIn,
        };
        self.field = 0;
    }

    pub fn focused_value_mut(&mut self) -> &mut String {
        match (self.mode, self.field) {
            (AuthMode::Register, 0) => &mut self.fullname,
            (AuthMode::Register, 1) => &mut self.age,
            (AuthMode::SignIn, 0) | (AuthMode::Register, 2) => &mut self.email,
            _ => &mut self.password,
        }
    }

    pub fn clear(&mut self) {
        *self = LoginForm::default();
    }
}

/// Severity of a [`Notice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A dismissible status banner shown at the bottom of the screen
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_focus_wraps() {
        let mut form = LoginForm::default();
        form.focus_next();
        assert_eq!(form.field, 1);
        form.focus_next();
        assert_eq!(form.field, 0);
        form.focus_prev();
        assert_eq!(form.field, 1);
    }

    #[test]
    fn test_toggle_mode_keeps_email() {
        let mut form = LoginForm {
            email: "a@b.com".to_string(),
            field: 1,
            ..Default::default()
        };
        form.toggle_mode();
        assert_eq!(form.mode, AuthMode::Register);
        assert_eq!(form.email, "a@b.com");
        assert_eq!(form.field, 0);
        assert_eq!(form.field_count(), 4);
    }

    #[test]
    fn test_focused_value_by_mode() {
        let mut form = LoginForm::default();
        form.focused_value_mut().push('x');
        assert_eq!(form.email, "x");

        form.toggle_mode();
        form.focused_value_mut().push('y');
        assert_eq!(form.fullname, "y");
        form.field = 3;
        form.focused_value_mut().push('z');
        assert_eq!(form.password, "z");
    }
}
