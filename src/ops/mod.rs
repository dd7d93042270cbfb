//! High-level operations.
//!
//! This module contains the implementation of verinfo commands.

pub mod generate;

pub use generate::{
    assembly_attributes, emit, generate_to_file, GenerateError, GenerateResult, GeneratedCode,
    Generator,
};
