pub mod add;
pub mod list;
pub mod remove;
pub mod select;

pub use add::add_command;
pub use list::list_command;
pub use remove::remove_command;
pub use select::select_command;
