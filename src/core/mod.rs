//! Core types shared across the codebase.

mod category;

pub use category::ContentKind;
