pub mod entities;
pub mod input;
pub mod run;
pub mod sanitize;

pub use entities::entities_command;
pub use run::duplicate_command;
pub use sanitize::sanitize_command;
