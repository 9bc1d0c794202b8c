//! Core error types and blittable primitives for the `nativekit` crates.
//!
//! This crate establishes the foundational building blocks shared by the
//! loader and string-cache crates.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing all possible failure modes for predictable error handling.
//! - **`types`**: Contains [`NativeBool`], a single-byte boolean with the same
//!   memory representation on both sides of a C ABI boundary.

pub mod errors;
pub mod types;

pub use self::{
    errors::{Error, Result},
    types::NativeBool,
};
