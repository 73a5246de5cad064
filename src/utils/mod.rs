//!
//! Utility module for the wallets bootstrap.
//!
//! Re-exports id generation and display helpers for use throughout the codebase.
/// Id generation and formatting helpers
pub mod index;

pub use index::{display_label, generate_document_id};
