//! Core domain logic for Notepad.
//! This crate is the single source of truth for business invariants.

pub mod archive;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use archive::sqlite::SqliteNoteArchive;
pub use archive::{
    open_archive, open_archive_in_memory, ArchiveError, ArchiveResult, ArchiveSnapshot,
    NoteArchive,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId};
pub use service::note_service::{NoteService, NoteServiceError};
pub use store::note_store::{InMemoryNoteStore, NoteStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
