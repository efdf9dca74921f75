pub mod cli;
pub mod config;
pub mod hierarchy;
pub mod render;
pub mod source;
