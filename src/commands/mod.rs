pub mod duplicate;
pub mod env;
pub mod settings;
