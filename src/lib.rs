pub mod api;
pub mod config;
pub mod duplicate;
pub mod ui;
