//! FFI surface crate for the notepad core.
//!
//! The UI host links against this crate only; `notepad_core` stays free of
//! boundary concerns.

pub mod api;
