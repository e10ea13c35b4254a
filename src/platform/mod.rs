// sevlog - platform/mod.rs
//
// File-system collaborators: config source and append-only sink.

pub mod config;
pub mod sink;
