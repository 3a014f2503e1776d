//! Configuration sections of `faqmark.toml`.
//!
//! | Section   | Purpose                                          |
//! |-----------|--------------------------------------------------|
//! | `[build]` | Content/output paths and output format           |

mod build;

pub use build::BuildSectionConfig;
