// File: src/core/mod.rs

pub mod aisle;
pub mod assembler;
pub mod catalog;
pub mod engine;
pub mod orders;
pub mod sampler;
pub mod types;
