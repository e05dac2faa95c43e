pub mod config;
pub mod new;
