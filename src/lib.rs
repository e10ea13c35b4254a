// sevlog - lib.rs
//
// Library entry point. The binary in `main.rs` is a thin CLI over
// `app::bootstrap`.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use crate::core::logger::{LogOutcome, Logger, LoggerState};
pub use crate::core::model::Severity;
pub use crate::core::reader::{read_logs, read_logs_with, ReadFilter};
