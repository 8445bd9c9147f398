pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod events;
pub mod models;
pub mod state;
pub mod theme;
pub mod ui;

pub use app::App;
