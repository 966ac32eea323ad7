//! Note use-case service.
//!
//! # Responsibility
//! - Provide the note create/get/list/update/delete APIs.
//! - Mirror committed mutations to an optional durability archive.
//!
//! # Invariants
//! - `update_note` uses full subject/bullet replacement semantics.
//! - Note listing is always in ascending id order.
//! - The store mutates first; the archive only sees committed state.

use crate::archive::{ArchiveError, NoteArchive};
use crate::model::note::{Note, NoteId};
use crate::store::note_store::{NoteStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// The store can no longer allocate ids.
    IdsExhausted,
    /// Durability-layer failure; the in-memory mutation stays applied.
    Archive(ArchiveError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::IdsExhausted => write!(f, "note id space exhausted"),
            Self::Archive(err) => write!(f, "archive failure: {err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Archive(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NoteNotFound(id),
            StoreError::IdsExhausted => Self::IdsExhausted,
        }
    }
}

impl From<ArchiveError> for NoteServiceError {
    fn from(value: ArchiveError) -> Self {
        Self::Archive(value)
    }
}

/// Note service facade over a store implementation.
///
/// An attached archive receives every committed mutation; without one the
/// service is purely in-memory.
pub struct NoteService<S: NoteStore> {
    store: S,
    archive: Option<Box<dyn NoteArchive>>,
}

impl<S: NoteStore> NoteService<S> {
    /// Creates a purely in-memory service over the provided store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            archive: None,
        }
    }

    /// Creates a service whose state is loaded from and mirrored to the
    /// provided archive.
    ///
    /// The archive snapshot replaces any state the store held, including the
    /// id counter, so retired ids stay retired across restarts.
    pub fn with_archive(
        mut store: S,
        mut archive: Box<dyn NoteArchive>,
    ) -> Result<Self, NoteServiceError> {
        let snapshot = archive.load()?;
        info!(
            "event=archive_load module=service status=ok notes={} next_id={}",
            snapshot.notes.len(),
            snapshot.next_id
        );
        store.restore(snapshot.notes, snapshot.next_id);
        Ok(Self {
            store,
            archive: Some(archive),
        })
    }

    /// Creates one note and returns its assigned id.
    ///
    /// Content is accepted as-is; subject and bullet points may be empty.
    pub fn create_note(
        &mut self,
        subject: String,
        bullet_points: Vec<String>,
    ) -> Result<NoteId, NoteServiceError> {
        let id = match self.store.create_note(subject, bullet_points) {
            Ok(id) => id,
            Err(err) => {
                warn!("event=note_create module=service status=error error={err}");
                return Err(err.into());
            }
        };

        if let Some(archive) = self.archive.as_mut() {
            let note = self.store.get_note(id)?;
            archive.record_created(&note, self.store.next_id())?;
        }

        info!("event=note_create module=service status=ok id={id}");
        Ok(id)
    }

    /// Gets one note by id. Pure read.
    pub fn get_note(&self, id: NoteId) -> Result<Note, NoteServiceError> {
        Ok(self.store.get_note(id)?)
    }

    /// Lists every live note in ascending id order. Pure read; never fails.
    pub fn list_notes(&self) -> Vec<Note> {
        self.store.list_notes()
    }

    /// Replaces subject and bullet points of an existing note wholesale.
    pub fn update_note(
        &mut self,
        id: NoteId,
        subject: String,
        bullet_points: Vec<String>,
    ) -> Result<(), NoteServiceError> {
        self.store.update_note(id, subject, bullet_points)?;

        if let Some(archive) = self.archive.as_mut() {
            let note = self.store.get_note(id)?;
            archive.record_updated(&note)?;
        }

        info!("event=note_update module=service status=ok id={id}");
        Ok(())
    }

    /// Permanently removes one note; its id is never reissued.
    pub fn delete_note(&mut self, id: NoteId) -> Result<(), NoteServiceError> {
        self.store.delete_note(id)?;

        if let Some(archive) = self.archive.as_mut() {
            archive.record_deleted(id)?;
        }

        info!("event=note_delete module=service status=ok id={id}");
        Ok(())
    }
}
