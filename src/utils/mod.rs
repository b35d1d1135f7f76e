//! Shared helpers: wall-clock timing and logger setup

mod logger;
mod timer;

pub use logger::{init_logger, LogLevel};
pub use timer::Timer;
