//! Wikigraph Core: shared error taxonomy and configuration traits.
//!
//! This crate provides the foundational types used across all Wikigraph
//! crates. It has no internal Wikigraph dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types, stable error codes and the `Result` alias
//! - [`traits`]: Configuration abstraction for front ends

#![doc = include_str!("../README.md")]

pub mod error;
pub mod traits;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::ConfigProvider;
