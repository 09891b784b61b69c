//! Prelude module for bikram_sambat crate.
//!
//! Re-exports the derive_more macros the date types use.

pub use derive_more::Display;
