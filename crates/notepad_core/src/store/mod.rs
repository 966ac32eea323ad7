//! Store layer abstractions and the in-memory implementation.
//!
//! # Responsibility
//! - Define the use-case oriented note storage contract.
//! - Isolate map-and-counter bookkeeping from service orchestration.
//!
//! # Invariants
//! - Store APIs return semantic errors (`NotFound`) instead of panicking.
//! - Each operation applies atomically with respect to the others; callers
//!   never observe a partially applied create/update/delete.

pub mod note_store;
