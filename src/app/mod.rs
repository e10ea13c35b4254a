// sevlog - app/mod.rs
//
// Application layer: wires core and platform together for the binary.

pub mod bootstrap;
