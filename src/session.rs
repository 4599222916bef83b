//! Two-screen view controller.
//!
//! `Session` holds everything the window shows and nothing that outlives a
//! logout: the current screen, entry field contents, the rows in the table,
//! the selected row and the modal notification waiting to be dismissed. Each
//! user action is a named transition; the window only renders `view()`.

use crate::auth;
use crate::db::Store;
use crate::students::{self, AddStudentError, StudentRecord, ValidationError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

pub const LOGIN_TITLE: &str = "Login - School Management System";
pub const MAIN_TITLE: &str = "School Management System";
pub const LOGIN_GEOMETRY: &str = "300x200";
pub const MAIN_GEOMETRY: &str = "700x400";
pub const COLUMNS: [&str; 4] = ["ID", "Name", "Age", "Class"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Login,
    Main,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Login => LOGIN_TITLE,
            Screen::Main => MAIN_TITLE,
        }
    }

    pub fn geometry(self) -> &'static str {
        match self {
            Screen::Login => LOGIN_GEOMETRY,
            Screen::Main => MAIN_GEOMETRY,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Login => f.write_str("login"),
            Screen::Main => f.write_str("main"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
    Name,
    Age,
    Class,
}

impl Field {
    pub fn parse(s: &str) -> Option<Field> {
        match s {
            "username" => Some(Field::Username),
            "password" => Some(Field::Password),
            "name" => Some(Field::Name),
            "age" => Some(Field::Age),
            "class" => Some(Field::Class),
            _ => None,
        }
    }

    pub fn screen(self) -> Screen {
        match self {
            Field::Username | Field::Password => Screen::Login,
            Field::Name | Field::Age | Field::Class => Screen::Main,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub message: String,
}

impl Notification {
    fn new(level: Level, title: &str, message: &str) -> Notification {
        Notification {
            level,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{action} is not available on the {screen} screen")]
    NotAvailable { action: &'static str, screen: Screen },
    #[error("dismiss the pending notification first")]
    NotificationPending,
    #[error("student {0} is not in the list")]
    UnknownRow(i64),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Default, Clone)]
struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Default, Clone)]
struct StudentForm {
    name: String,
    age: String,
    class: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub screen: Screen,
    pub title: &'static str,
    pub geometry: &'static str,
    pub fields: BTreeMap<&'static str, String>,
    pub columns: Vec<&'static str>,
    pub students: Vec<StudentRecord>,
    pub selected_id: Option<i64>,
    pub notification: Option<Notification>,
}

#[derive(Debug)]
pub struct Session {
    screen: Screen,
    login: LoginForm,
    form: StudentForm,
    rows: Vec<StudentRecord>,
    selected: Option<i64>,
    pending: Option<Notification>,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    pub fn new() -> Session {
        Session {
            screen: Screen::Login,
            login: LoginForm::default(),
            form: StudentForm::default(),
            rows: Vec::new(),
            selected: None,
            pending: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn rows(&self) -> &[StudentRecord] {
        &self.rows
    }

    pub fn pending(&self) -> Option<&Notification> {
        self.pending.as_ref()
    }

    pub fn view(&self) -> View {
        let mut fields = BTreeMap::new();
        let mut columns = Vec::new();
        match self.screen {
            Screen::Login => {
                fields.insert("username", self.login.username.clone());
                fields.insert("password", "*".repeat(self.login.password.chars().count()));
            }
            Screen::Main => {
                fields.insert("name", self.form.name.clone());
                fields.insert("age", self.form.age.clone());
                fields.insert("class", self.form.class.clone());
                columns.extend(COLUMNS);
            }
        }
        View {
            screen: self.screen,
            title: self.screen.title(),
            geometry: self.screen.geometry(),
            fields,
            columns,
            students: self.rows.clone(),
            selected_id: self.selected,
            notification: self.pending.clone(),
        }
    }

    fn ready(&self, action: &'static str, screen: Screen) -> Result<(), SessionError> {
        if self.pending.is_some() {
            return Err(SessionError::NotificationPending);
        }
        if self.screen != screen {
            return Err(SessionError::NotAvailable {
                action,
                screen: self.screen,
            });
        }
        Ok(())
    }

    fn notify(&mut self, n: Notification) -> Option<Notification> {
        self.pending = Some(n.clone());
        Some(n)
    }

    pub fn dismiss(&mut self) -> Option<Notification> {
        self.pending.take()
    }

    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), SessionError> {
        self.ready("editing this field", field.screen())?;
        let slot = match field {
            Field::Username => &mut self.login.username,
            Field::Password => &mut self.login.password,
            Field::Name => &mut self.form.name,
            Field::Age => &mut self.form.age,
            Field::Class => &mut self.form.class,
        };
        *slot = value.to_string();
        Ok(())
    }

    pub fn submit_login(&mut self, store: &Store) -> Result<Option<Notification>, SessionError> {
        self.ready("login", Screen::Login)?;
        let username = self.login.username.clone();
        if !auth::authenticate(store, &username, &self.login.password)? {
            tracing::info!(username = %username, "login rejected");
            return Ok(self.notify(Notification::new(
                Level::Error,
                "Login Failed",
                "Invalid credentials.",
            )));
        }

        tracing::info!(username = %username, "login accepted");
        self.screen = Screen::Main;
        self.login = LoginForm::default();
        self.form = StudentForm::default();
        self.selected = None;
        self.reload(store)?;
        Ok(None)
    }

    /// Re-reads every row from the store into the table.
    pub fn refresh(&mut self, store: &Store) -> Result<(), SessionError> {
        self.ready("refresh", Screen::Main)?;
        self.reload(store)
    }

    fn reload(&mut self, store: &Store) -> Result<(), SessionError> {
        self.rows = students::list_all(store)?;
        if let Some(id) = self.selected {
            if !self.rows.iter().any(|r| r.id == id) {
                self.selected = None;
            }
        }
        Ok(())
    }

    /// On success returns the stored record alongside the notification.
    pub fn submit_add(
        &mut self,
        store: &Store,
    ) -> Result<(Option<StudentRecord>, Option<Notification>), SessionError> {
        self.ready("add student", Screen::Main)?;
        let added = students::add(store, &self.form.name, &self.form.age, &self.form.class);
        match added {
            Ok(rec) => {
                tracing::info!(id = rec.id, "student added");
                self.form = StudentForm::default();
                self.reload(store)?;
                let n = self.notify(Notification::new(Level::Info, "Success", "Student added"));
                Ok((Some(rec), n))
            }
            Err(AddStudentError::Invalid(ValidationError::MissingField)) => Ok((
                None,
                self.notify(Notification::new(
                    Level::Warning,
                    "Input Error",
                    "Please fill all fields",
                )),
            )),
            Err(AddStudentError::Invalid(ValidationError::InvalidAge)) => Ok((
                None,
                self.notify(Notification::new(
                    Level::Error,
                    "Input Error",
                    "Age must be a number",
                )),
            )),
            Err(AddStudentError::Store(e)) => Err(SessionError::Store(e.into())),
        }
    }

    pub fn select(&mut self, id: Option<i64>) -> Result<(), SessionError> {
        self.ready("select", Screen::Main)?;
        if let Some(id) = id {
            if !self.rows.iter().any(|r| r.id == id) {
                return Err(SessionError::UnknownRow(id));
            }
        }
        self.selected = id;
        Ok(())
    }

    pub fn submit_delete(&mut self, store: &Store) -> Result<Option<Notification>, SessionError> {
        self.ready("delete", Screen::Main)?;
        let Some(id) = self.selected else {
            return Ok(self.notify(Notification::new(
                Level::Warning,
                "Selection Error",
                "No student selected",
            )));
        };

        let removed = students::delete_by_id(store, id)?;
        tracing::info!(id, removed, "student deleted");
        // The table drops the row itself; no reload.
        self.rows.retain(|r| r.id != id);
        self.selected = None;
        Ok(self.notify(Notification::new(
            Level::Info,
            "Deleted",
            "Student record deleted",
        )))
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.ready("logout", Screen::Main)?;
        *self = Session::new();
        Ok(())
    }
}
