//! FFI use-case API for the UI-facing note operations.
//!
//! # Responsibility
//! - Expose stable, use-case-level note CRUD functions to the UI host.
//! - Hold the single process-wide store behind one mutual-exclusion
//!   boundary so map and counter mutate together.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every fallible operation reports through its envelope's ok/err shape;
//!   failures are returned as messages, never swallowed.
//! - The UI re-fetches the full list after successful mutations; the store
//!   pushes no change notifications.

use log::info;
use notepad_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_archive,
    ping as ping_inner, InMemoryNoteStore, Note, NoteService, NoteServiceError, SqliteNoteArchive,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

const ARCHIVE_PATH_ENV: &str = "NOTEPAD_DB_PATH";

// Initialization happens once; a failed archive bootstrap is kept and
// replayed as an error envelope on every subsequent call.
static STORE: OnceLock<Result<Mutex<NoteService<InMemoryNoteStore>>, String>> = OnceLock::new();

/// Minimal health-check API for boundary smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Read model for one note crossing the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteView {
    /// Stable note id.
    pub id: u64,
    /// Free-text subject line.
    pub subject: String,
    /// Ordered bullet points, exactly as stored.
    pub bullet_points: Vec<String>,
}

impl From<Note> for NoteView {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            subject: note.subject,
            bullet_points: note.bullet_points,
        }
    }
}

/// Action response envelope for note mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Id of the affected note on success.
    pub note_id: Option<u64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: u64) -> Self {
        Self {
            ok: true,
            note_id: Some(note_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Detail response envelope for single-note reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDetailResponse {
    /// The note when found, `None` on failure.
    pub note: Option<NoteView>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// List response envelope for the full-enumeration read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListResponse {
    /// Every live note in ascending id order.
    pub items: Vec<NoteView>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Creates one note and returns its assigned id.
///
/// # FFI contract
/// - Sync call; in-memory execution plus optional archive write.
/// - Never panics.
/// - Not idempotent: a retried call creates a second note with a fresh id.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create(subject: String, bullet_points: Vec<String>) -> NoteActionResponse {
    match with_store(|service| service.create_note(subject, bullet_points)) {
        Ok(id) => NoteActionResponse::success("Note created.", id),
        Err(err) => NoteActionResponse::failure(format!("note_create failed: {err}")),
    }
}

/// Gets one note by id.
///
/// # FFI contract
/// - Sync call, pure read.
/// - Never panics.
/// - Absent ids yield `note: None` with a not-found message.
#[flutter_rust_bridge::frb(sync)]
pub fn note_get(id: u64) -> NoteDetailResponse {
    match with_store(|service| service.get_note(id)) {
        Ok(note) => NoteDetailResponse {
            note: Some(note.into()),
            message: "Note found.".to_string(),
        },
        Err(err) => NoteDetailResponse {
            note: None,
            message: format!("note_get failed: {err}"),
        },
    }
}

/// Lists every live note.
///
/// # FFI contract
/// - Sync call, pure read; the listing itself never fails.
/// - Never panics.
/// - Items are in ascending id order.
#[flutter_rust_bridge::frb(sync)]
pub fn note_list() -> NoteListResponse {
    match with_store(|service| Ok(service.list_notes())) {
        Ok(notes) => {
            let items = notes.into_iter().map(NoteView::from).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No notes.".to_string()
            } else {
                format!("Found {} note(s).", items.len())
            };
            NoteListResponse { items, message }
        }
        Err(err) => NoteListResponse {
            items: Vec::new(),
            message: format!("note_list failed: {err}"),
        },
    }
}

/// Replaces subject and bullet points of an existing note wholesale.
///
/// # FFI contract
/// - Sync call; in-memory execution plus optional archive write.
/// - Never panics.
/// - Callers must resend the complete subject and bullet list; fields are
///   overwritten, not merged.
#[flutter_rust_bridge::frb(sync)]
pub fn note_update(id: u64, subject: String, bullet_points: Vec<String>) -> NoteActionResponse {
    match with_store(|service| service.update_note(id, subject, bullet_points)) {
        Ok(()) => NoteActionResponse::success("Note updated.", id),
        Err(err) => NoteActionResponse::failure(format!("note_update failed: {err}")),
    }
}

/// Permanently deletes one note; its id is never reissued.
///
/// # FFI contract
/// - Sync call; in-memory execution plus optional archive write.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(id: u64) -> NoteActionResponse {
    match with_store(|service| service.delete_note(id)) {
        Ok(()) => NoteActionResponse::success("Note deleted.", id),
        Err(err) => NoteActionResponse::failure(format!("note_delete failed: {err}")),
    }
}

fn with_store<T>(
    f: impl FnOnce(&mut NoteService<InMemoryNoteStore>) -> Result<T, NoteServiceError>,
) -> Result<T, String> {
    match STORE.get_or_init(init_store) {
        Ok(store) => {
            let mut service = store
                .lock()
                .map_err(|_| "note store mutex poisoned".to_string())?;
            f(&mut service).map_err(|err| err.to_string())
        }
        Err(message) => Err(message.clone()),
    }
}

fn init_store() -> Result<Mutex<NoteService<InMemoryNoteStore>>, String> {
    let service = match resolve_archive_path() {
        Some(path) => {
            let conn = open_archive(&path)
                .map_err(|err| format!("archive open failed at `{}`: {err}", path.display()))?;
            let service = NoteService::with_archive(
                InMemoryNoteStore::new(),
                Box::new(SqliteNoteArchive::new(conn)),
            )
            .map_err(|err| format!("archive load failed at `{}`: {err}", path.display()))?;
            info!("event=store_init module=ffi status=ok mode=archive");
            service
        }
        None => {
            info!("event=store_init module=ffi status=ok mode=memory");
            NoteService::new(InMemoryNoteStore::new())
        }
    };
    Ok(Mutex::new(service))
}

fn resolve_archive_path() -> Option<PathBuf> {
    let raw = std::env::var(ARCHIVE_PATH_ENV).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, note_create, note_delete, note_get, note_list, note_update,
        ping,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    // The store is process-global and shared across this module's tests, so
    // every test works with the ids it created and unique subjects.
    #[test]
    fn note_create_then_get_round_trips() {
        let subject = unique_token("roundtrip");
        let created = note_create(subject.clone(), vec!["Milk".to_string(), "Eggs".to_string()]);
        assert!(created.ok, "{}", created.message);
        let id = created.note_id.expect("create should return note_id");

        let fetched = note_get(id);
        let note = fetched.note.expect("created note should be found");
        assert_eq!(note.id, id);
        assert_eq!(note.subject, subject);
        assert_eq!(note.bullet_points, vec!["Milk", "Eggs"]);
    }

    #[test]
    fn note_update_overwrites_fields_wholesale() {
        let created = note_create(
            unique_token("pre-update"),
            vec!["a".to_string(), "b".to_string()],
        );
        assert!(created.ok, "{}", created.message);
        let id = created.note_id.expect("create should return note_id");

        let replacement = unique_token("post-update");
        let updated = note_update(id, replacement.clone(), vec!["only".to_string()]);
        assert!(updated.ok, "{}", updated.message);
        assert_eq!(updated.note_id, Some(id));

        let note = note_get(id).note.expect("updated note should be found");
        assert_eq!(note.subject, replacement);
        assert_eq!(note.bullet_points, vec!["only"]);
    }

    #[test]
    fn note_delete_retires_the_id_permanently() {
        let created = note_create(unique_token("doomed"), Vec::new());
        assert!(created.ok, "{}", created.message);
        let id = created.note_id.expect("create should return note_id");

        let deleted = note_delete(id);
        assert!(deleted.ok, "{}", deleted.message);

        let fetched = note_get(id);
        assert!(fetched.note.is_none());
        assert!(fetched.message.contains("not found"));

        let successor = note_create(unique_token("successor"), Vec::new());
        assert!(successor.ok, "{}", successor.message);
        assert!(successor.note_id.expect("successor id") > id);
    }

    #[test]
    fn note_list_contains_created_note_and_ascending_ids() {
        let subject = unique_token("list");
        let created = note_create(subject.clone(), Vec::new());
        assert!(created.ok, "{}", created.message);
        let id = created.note_id.expect("create should return note_id");

        let listed = note_list();
        assert!(listed
            .items
            .iter()
            .any(|item| item.id == id && item.subject == subject));
        let ids = listed.items.iter().map(|item| item.id).collect::<Vec<_>>();
        let mut ascending = ids.clone();
        ascending.sort_unstable();
        assert_eq!(ids, ascending);
    }

    #[test]
    fn absent_id_fails_every_single_record_operation() {
        let absent = u64::MAX;
        assert!(note_get(absent).note.is_none());

        let updated = note_update(absent, "x".to_string(), Vec::new());
        assert!(!updated.ok);
        assert!(updated.message.contains("not found"));

        let deleted = note_delete(absent);
        assert!(!deleted.ok);
        assert!(deleted.message.contains("not found"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
