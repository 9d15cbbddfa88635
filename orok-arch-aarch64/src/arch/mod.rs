//! Architecture specific, Oro-agnostic aarch64 facilities and types.

pub mod reg;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
pub mod tso;

pub use tso::{MemoryModel, Tso, TsoThread, Unsupported};
