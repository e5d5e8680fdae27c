// src/lib.rs

pub mod cli;
pub mod logging;
pub mod server;
pub mod settings;
pub mod sheets;
