//! Note store contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide the five note operations: create, get, list, update, delete.
//! - Own id allocation via a monotonically increasing counter.
//!
//! # Invariants
//! - Live ids are always a subset of `[0, next_id)`; `next_id` only grows.
//! - A deleted id is never reassigned, even after process-lifetime churn.
//! - Updates replace subject and bullet points wholesale; `id` is fixed.

use crate::model::note::{Note, NoteId};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for note lookup and allocation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Referenced id has no live note.
    NotFound(NoteId),
    /// The id counter reached its maximum; no further notes can be created.
    IdsExhausted,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::IdsExhausted => write!(f, "note id space exhausted"),
        }
    }
}

impl Error for StoreError {}

/// Storage interface for note CRUD operations.
pub trait NoteStore {
    /// Creates a note from caller content and returns its assigned id.
    fn create_note(
        &mut self,
        subject: String,
        bullet_points: Vec<String>,
    ) -> StoreResult<NoteId>;
    /// Gets one live note by id.
    fn get_note(&self, id: NoteId) -> StoreResult<Note>;
    /// Lists every live note in ascending id order.
    fn list_notes(&self) -> Vec<Note>;
    /// Replaces subject and bullet points of an existing note wholesale.
    fn update_note(
        &mut self,
        id: NoteId,
        subject: String,
        bullet_points: Vec<String>,
    ) -> StoreResult<()>;
    /// Permanently removes one note; its id is retired forever.
    fn delete_note(&mut self, id: NoteId) -> StoreResult<()>;
    /// Returns the id the next successful create will assign.
    fn next_id(&self) -> NoteId;
    /// Replaces the full store state with an externally loaded snapshot.
    fn restore(&mut self, notes: Vec<Note>, next_id: NoteId);
}

/// In-memory note store: one ordered map guarded by an id counter.
///
/// `BTreeMap` keeps keys sorted, so `list_notes` yields ascending id order
/// without extra bookkeeping.
#[derive(Debug, Default)]
pub struct InMemoryNoteStore {
    notes: BTreeMap<NoteId, Note>,
    next_id: NoteId,
}

impl InMemoryNoteStore {
    /// Creates an empty store; the first created note receives id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live notes.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns whether the store holds no live notes.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl NoteStore for InMemoryNoteStore {
    fn create_note(
        &mut self,
        subject: String,
        bullet_points: Vec<String>,
    ) -> StoreResult<NoteId> {
        let id = self.next_id;
        // Reserve the next counter value before inserting, so a full counter
        // fails the call without touching the map.
        self.next_id = self.next_id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        self.notes.insert(id, Note::with_id(id, subject, bullet_points));
        Ok(id)
    }

    fn get_note(&self, id: NoteId) -> StoreResult<Note> {
        self.notes
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn list_notes(&self) -> Vec<Note> {
        self.notes.values().cloned().collect()
    }

    fn update_note(
        &mut self,
        id: NoteId,
        subject: String,
        bullet_points: Vec<String>,
    ) -> StoreResult<()> {
        let note = self.notes.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        note.subject = subject;
        note.bullet_points = bullet_points;
        Ok(())
    }

    fn delete_note(&mut self, id: NoteId) -> StoreResult<()> {
        // The counter is untouched: a freed id is never reissued.
        self.notes
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    fn next_id(&self) -> NoteId {
        self.next_id
    }

    fn restore(&mut self, notes: Vec<Note>, next_id: NoteId) {
        self.notes = notes.into_iter().map(|note| (note.id, note)).collect();
        self.next_id = next_id;
    }
}
