pub mod app;
pub mod cli;
pub mod config;
pub mod llm;
pub mod models;
pub mod paths;
pub mod util;
