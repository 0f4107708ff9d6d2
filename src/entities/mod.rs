pub mod label;
pub mod status;
pub mod task;
pub mod task_label;
pub mod user;

pub use label::Entity as Label;
pub use status::Entity as Status;
pub use task::Entity as Task;
pub use task_label::Entity as TaskLabel;
pub use user::Entity as User;
