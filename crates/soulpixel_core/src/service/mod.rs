//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model, layout and storage into board-level operations.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod thought_store;
