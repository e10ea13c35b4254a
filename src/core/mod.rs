// sevlog - core/mod.rs
//
// Core logic: severity model, entry formatting, clock, logger, read-back.

pub mod clock;
pub mod logger;
pub mod model;
pub mod reader;
