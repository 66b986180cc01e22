// src/core/mod.rs
pub mod compiler;
pub mod context;
pub mod engine;
pub mod policy;
pub mod synth;
pub mod types;
