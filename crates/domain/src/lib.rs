pub mod config;
pub mod error;
pub mod project;
pub mod trace;
