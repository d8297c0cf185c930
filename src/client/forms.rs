//! Client-side form validation, applied before anything is sent.

use lazy_static::lazy_static;
use regex::Regex;
use validator::{Validate, ValidationError};

use crate::auth::{LoginRequest, SignupRequest};
use crate::models::{NewTask, TaskPatch, TaskStatus};

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
    // Allowed alphabet only; the "at least one of each" rules are checked separately.
    static ref PASSWORD_CHARSET_REGEX: Regex = Regex::new(r"^[A-Za-z\d@$!%*?&]{8,}$").unwrap();
}

const PASSWORD_SPECIALS: &str = "@$!%*?&";

fn password_policy(password: &str) -> Result<(), ValidationError> {
    let strong = PASSWORD_CHARSET_REGEX.is_match(password)
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c));
    if strong {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_policy");
        err.message = Some("Password must include uppercase, number, and special character".into());
        Err(err)
    }
}

fn known_status(status: &str) -> Result<(), ValidationError> {
    status
        .parse::<TaskStatus>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("Status is required"))
}

/// The create/edit modal. Both fields are required.
#[derive(Debug, Clone, Default, Validate)]
pub struct TaskForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(custom = "known_status")]
    pub status: String,
}

impl TaskForm {
    pub fn new(title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            title: title.into(),
            status: status.to_string(),
        }
    }

    fn status(&self) -> TaskStatus {
        self.status.parse().unwrap_or_default()
    }

    /// Body for `POST /api/tasks`. Call `validate` first.
    pub fn to_new_task(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            status: Some(self.status()),
        }
    }

    /// Body for `PUT /api/tasks/{id}` when editing.
    pub fn to_patch(&self) -> TaskPatch {
        TaskPatch {
            title: Some(self.title.clone()),
            status: Some(self.status()),
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct SignupForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(regex(path = "EMAIL_REGEX", message = "Please enter a valid email address"))]
    pub useremail: String,
    #[validate(
        length(min = 8, message = "Password must be at least 8 characters"),
        custom = "password_policy"
    )]
    pub password: String,
}

impl SignupForm {
    pub fn to_request(&self) -> SignupRequest {
        SignupRequest {
            name: self.name.clone(),
            useremail: self.useremail.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct LoginForm {
    #[validate(regex(path = "EMAIL_REGEX", message = "Please enter a valid email address"))]
    pub useremail: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginForm {
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            useremail: self.useremail.clone(),
            password: self.password.clone(),
        }
    }
}
