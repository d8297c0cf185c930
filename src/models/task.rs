use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Represents the workflow status of a task.
///
/// The wire strings are the column names shown on the board.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    /// Task is yet to be started.
    #[default]
    #[serde(rename = "To Do")]
    Todo,
    /// Task is currently being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Task is completed.
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    /// Every status, in board column order.
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown task status: {:?}", s))
    }
}

/// Represents a task as stored in memory and returned by the API.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    /// Store-assigned identifier. Never reused.
    pub id: u64,
    pub title: String,
    pub status: TaskStatus,
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewTask {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Absent, `null` and `""` all mean "To Do".
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<TaskStatus>,
}

/// Body of `PUT /api/tasks/{id}`. Only the fields present are applied.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct TaskPatch {
    #[validate(length(min = 1, max = 200))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl Task {
    /// Builds a task from validated input and the id the store assigned.
    pub fn new(id: u64, input: NewTask) -> Self {
        Self {
            id,
            title: input.title,
            status: input.status.unwrap_or_default(),
        }
    }

    /// Applies a partial update. Absent fields are left as they are.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<TaskStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_value(TaskStatus::Todo).unwrap(), json!("To Do"));
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            json!("In Progress")
        );
        assert_eq!("Done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_task_creation_defaults_status() {
        let input: NewTask = serde_json::from_value(json!({ "title": "Write spec" })).unwrap();
        let task = Task::new(1, input);
        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            json!({ "id": 1, "title": "Write spec", "status": "To Do" })
        );

        let blank: NewTask =
            serde_json::from_value(json!({ "title": "X", "status": "" })).unwrap();
        assert_eq!(blank.status, None);

        let null: NewTask =
            serde_json::from_value(json!({ "title": "X", "status": null })).unwrap();
        assert_eq!(null.status, None);
    }

    #[test]
    fn test_new_task_rejects_unknown_status() {
        let parsed = serde_json::from_value::<NewTask>(json!({ "title": "X", "status": "Later" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_task_validation() {
        let valid = NewTask {
            title: "Valid Task".to_string(),
            status: None,
        };
        assert!(valid.validate().is_ok());

        let empty = NewTask {
            title: "".to_string(),
            status: Some(TaskStatus::Done),
        };
        assert!(empty.validate().is_err());

        let long = TaskPatch {
            title: Some("a".repeat(201)),
            status: None,
        };
        assert!(long.validate().is_err());
        assert!(TaskPatch::default().validate().is_ok());
    }

    #[test]
    fn test_apply_patch_only_touches_present_fields() {
        let mut task = Task {
            id: 7,
            title: "Ship it".to_string(),
            status: TaskStatus::InProgress,
        };
        task.apply(TaskPatch {
            title: None,
            status: Some(TaskStatus::Done),
        });
        assert_eq!(
            task,
            Task {
                id: 7,
                title: "Ship it".to_string(),
                status: TaskStatus::Done,
            }
        );
    }
}
