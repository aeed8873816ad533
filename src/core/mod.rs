// src/core/mod.rs

//! Core data structures and types

pub mod color;
pub mod constants;
pub mod error;
pub mod register;
pub mod state;

// Re-export public types for convenient access via `qcolor::core::TypeName`
pub use color::VertexColor;
pub use error::{QcolorError, Result};
pub use register::{Qubit, Register, RegisterId};
pub use state::StateVector;
