//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and archive calls into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod note_service;
