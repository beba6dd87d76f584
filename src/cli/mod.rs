// ABOUTME: CLI module for the pgprovision service
// ABOUTME: Exports command line interface components and main application logic

pub mod app;
pub mod args;
pub mod commands;
pub mod config;

pub use app::App;
pub use args::{Args, Commands, GenerateArgs};
pub use config::Config;
