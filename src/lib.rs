// Library module for shahash
// Re-exports modules for use in integration tests and the binary

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod hash;
