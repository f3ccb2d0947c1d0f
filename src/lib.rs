pub mod calculators;
pub mod config;
pub mod fetch;
pub mod location;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod scoring;
pub mod stderr_buffer;
pub mod tui;
pub mod weather;
