//! Client library: the session context, the HTTP client and the board/table
//! views, tied together by [`TaskDeck`].

pub mod api;
pub mod board;
pub mod forms;
pub mod session;

use std::fmt;

use validator::{Validate, ValidationErrors};

pub use api::ApiClient;
pub use board::{render_detail, Dashboard, PendingMove, ViewMode};
pub use forms::{LoginForm, SignupForm, TaskForm};
pub use session::{FileStorage, MemoryStorage, SessionContext, SessionState, SessionStorage};

use crate::models::{AccountView, Task, TaskPatch, TaskStatus};

#[derive(Debug)]
pub enum ClientError {
    /// The request never got a response.
    Http(reqwest::Error),
    /// The server answered with a non-success status and this `{message}`.
    Api { status: u16, message: String },
    /// A form failed validation before it was sent.
    Validation(ValidationErrors),
    /// Persisted session storage could not be read or written.
    Storage(String),
    /// The call needs a logged-in session.
    NotAuthenticated,
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Http(err) => write!(f, "Network error: {}", err),
            ClientError::Api { message, .. } => f.write_str(message),
            ClientError::Validation(errors) => write!(f, "Validation error: {}", errors),
            ClientError::Storage(msg) => write!(f, "Storage error: {}", msg),
            ClientError::NotAuthenticated => f.write_str("Not logged in"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::Http(error)
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(error: ValidationErrors) -> Self {
        ClientError::Validation(error)
    }
}

/// One client session: credentials, the local task list and the API behind them.
pub struct TaskDeck<S: SessionStorage> {
    api: ApiClient,
    session: SessionContext<S>,
    dashboard: Dashboard,
    /// Message from the last failed fetch, shown with a retry affordance.
    pub last_error: Option<String>,
}

impl<S: SessionStorage> TaskDeck<S> {
    pub fn new(api: ApiClient, storage: S) -> Self {
        Self {
            api,
            session: SessionContext::new(storage),
            dashboard: Dashboard::new(),
            last_error: None,
        }
    }

    pub fn session(&self) -> &SessionContext<S> {
        &self.session
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    fn token(&self) -> Result<String, ClientError> {
        self.session
            .bearer()
            .map(str::to_owned)
            .ok_or(ClientError::NotAuthenticated)
    }

    /// Returns the server's confirmation message.
    pub async fn signup(&self, form: &SignupForm) -> Result<String, ClientError> {
        form.validate()?;
        Ok(self.api.signup(&form.to_request()).await?.message)
    }

    pub async fn login(&mut self, form: &LoginForm) -> Result<AccountView, ClientError> {
        form.validate()?;
        let response = self.api.login(&form.to_request()).await?;
        self.session.login(response.token, response.user.clone())?;
        Ok(response.user)
    }

    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.dashboard.replace_all(Vec::new());
        self.last_error = None;
        self.session.logout()
    }

    /// Fetches the full task list. Calling it again is the retry.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let token = self.token()?;
        match self.api.list_tasks(Some(&token)).await {
            Ok(tasks) => {
                self.dashboard.replace_all(tasks);
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Creates a task, or updates `editing` when given.
    pub async fn submit(&mut self, form: &TaskForm, editing: Option<u64>) -> Result<Task, ClientError> {
        form.validate()?;
        let token = self.token()?;
        let task = match editing {
            Some(id) => self.api.update_task(Some(&token), id, &form.to_patch()).await?,
            None => self.api.create_task(Some(&token), &form.to_new_task()).await?,
        };
        self.dashboard.upsert(task.clone());
        Ok(task)
    }

    pub async fn delete(&mut self, id: u64) -> Result<(), ClientError> {
        let token = self.token()?;
        self.api.delete_task(Some(&token), id).await?;
        self.dashboard.remove(id);
        Ok(())
    }

    /// Drag-and-drop: move locally first, then confirm with the server or roll back.
    pub async fn move_task(&mut self, id: u64, status: TaskStatus) -> Result<(), ClientError> {
        let token = self.token()?;
        let Some(pending) = self.dashboard.begin_move(id, status) else {
            return Ok(());
        };
        let patch = TaskPatch {
            title: None,
            status: Some(status),
        };
        let outcome = self.api.update_task(Some(&token), id, &patch).await;
        self.dashboard.settle_move(pending, outcome)
    }
}
