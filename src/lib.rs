// src/lib.rs

pub mod core;
pub mod error;
pub mod input;
pub mod persistence;
pub use crate::core::engine::DatasetGenerator;
