pub mod account;
pub mod task;

pub use account::{Account, AccountView};
pub use task::{NewTask, Task, TaskPatch, TaskStatus};
