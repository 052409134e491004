// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod error;
pub mod pauli;
pub mod tableau;

// Re-export public types for convenient access via `stabsim::core::TypeName`
pub use error::{Result, StabError};
pub use pauli::{Pauli, PauliString};
pub use tableau::Tableau;
